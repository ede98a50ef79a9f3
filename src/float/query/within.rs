//! Fixed-radius (circular) search: same traversal shape as `nearest_one`, but
//! with a fixed threshold and full leaf enumeration.

use crate::distance::squared_euclidean;
use crate::float::kdtree::{KdTree, NodeRef};
use crate::nearest_neighbour::NearestNeighbour;
use crate::tracking::TrackingVector;

impl<'p, const D: usize, const B: usize> KdTree<'p, D, B> {
    /// Returns every point `p` with `0 < |p - q| < r`, self-excluded, in
    /// unspecified order.
    pub fn within(&self, q: &[f32; D], r: f32) -> Vec<NearestNeighbour<'p, D>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("within", r).entered();

        let mut results = Vec::new();
        let Some(root) = self.root else {
            return results;
        };

        let threshold = r * r;
        let mut stack = vec![(root, TrackingVector::default())];

        while let Some((node, track)) = stack.pop() {
            if track.length_sq() >= threshold {
                continue;
            }

            match node {
                NodeRef::Leaf(idx) => {
                    let leaf = self.leaf(idx);
                    if leaf.squared_dist_to_bounds(q) >= threshold {
                        continue;
                    }
                    for p in leaf.iter() {
                        let d = squared_euclidean(q, &p.coords);
                        if d > 0.0 && d < threshold {
                            results.push(NearestNeighbour { distance: d, item: p });
                        }
                    }
                }
                NodeRef::Stem(idx) => {
                    let stem = self.stem(idx);
                    let (near, far) = if q[stem.dim] <= stem.split {
                        (stem.left, stem.right)
                    } else {
                        (stem.right, stem.left)
                    };

                    if let Some(far_node) = far {
                        let crossing = stem.split - q[stem.dim];
                        if track.updated_length_sq(stem.dim, crossing) < threshold {
                            let mut far_track = track;
                            far_track.set(stem.dim, crossing);
                            stack.push((far_node, far_track));
                        }
                    }
                    if let Some(near_node) = near {
                        stack.push((near_node, track));
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(count = results.len(), "within found");

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn empty_tree_returns_empty() {
        let tree: KdTree<2, 4> = KdTree::new();
        assert!(tree.within(&[0.0, 0.0], 1.0).is_empty());
    }

    #[test]
    fn s1_known_radius() {
        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
            Point::new([5.0, 5.0]),
        ];
        let tree: KdTree<2, 4> = KdTree::construct(&points, Some(([0.0, 0.0], [5.0, 5.0])));
        let mut result: Vec<_> = tree.within(&[0.0, 0.0], 1.5).into_iter().map(|n| n.item.coords).collect();
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(result, vec![[0.0, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn s5_duplicates_excluding_self() {
        let dupes: Vec<Point<2>> = (0..20).map(|_| Point::new([0.0, 0.0])).collect();
        let extra = Point::new([1.0, 1.0]);
        let mut tree: KdTree<2, 8> = KdTree::new();
        for p in &dupes {
            tree.add(p);
        }
        tree.add(&extra);

        let result = tree.within(&[0.0, 0.0], 0.5);
        assert_eq!(result.len(), 19);
    }

    #[test]
    fn radius_is_strict_less_than() {
        let points = vec![Point::new([0.0, 0.0]), Point::new([1.0, 0.0])];
        let tree: KdTree<2, 4> = KdTree::construct(&points, None);
        assert!(tree.within(&[0.0, 0.0], 1.0).is_empty());
        assert_eq!(tree.within(&[0.0, 0.0], 1.0001).len(), 1);
    }
}
