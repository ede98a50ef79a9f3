//! Exact nearest-neighbor search with BOB pruning and partial-distance
//! tracking, modeled as a pure descent-frame stack (see the design notes on
//! why this is equivalent to the original's interleaved ascent/descent form).

use crate::distance::squared_euclidean;
use crate::float::kdtree::{KdTree, NodeRef};
use crate::point::Point;
use crate::tracking::TrackingVector;

impl<'p, const D: usize, const B: usize> KdTree<'p, D, B> {
    /// Finds the point in the tree nearest to `q` by squared Euclidean
    /// distance, skipping any candidate exactly coincident with `q`
    /// (self-exclusion). Returns `None` if the tree is empty or every point
    /// coincides with `q`.
    pub fn nearest_one(&self, q: &[f32; D]) -> Option<&'p Point<D>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("nearest_one").entered();

        let root = self.root?;

        let mut best: Option<(&'p Point<D>, f32)> = None;
        let mut stack = vec![(root, TrackingVector::default())];

        while let Some((node, track)) = stack.pop() {
            let best_dist = best.map(|(_, d)| d).unwrap_or(f32::INFINITY);
            if track.length_sq() >= best_dist {
                continue;
            }

            match node {
                NodeRef::Leaf(idx) => {
                    let leaf = self.leaf(idx);
                    if leaf.squared_dist_to_bounds(q) >= best_dist {
                        continue;
                    }
                    for p in leaf.iter() {
                        let d = squared_euclidean(q, &p.coords);
                        if d > 0.0 && d < best.map(|(_, bd)| bd).unwrap_or(f32::INFINITY) {
                            best = Some((p, d));
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
                        let far_best = best.map(|(_, d)| d).unwrap_or(f32::INFINITY);
                        if track.updated_length_sq(stem.dim, crossing) < far_best {
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
        if let Some((_, d)) = best {
            tracing::trace!(distance = d, "nearest_one found");
        }

        best.map(|(p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use rand::Rng;

    fn brute_force<'p, const D: usize>(points: &'p [Point<D>], q: &[f32; D]) -> Option<&'p Point<D>> {
        points
            .iter()
            .map(|p| (p, squared_euclidean(q, &p.coords)))
            .filter(|(_, d)| *d > 0.0)
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(p, _)| p)
    }

    #[test]
    fn empty_tree_returns_none() {
        let tree: KdTree<2, 4> = KdTree::new();
        assert_eq!(tree.nearest_one(&[0.0, 0.0]), None);
    }

    #[test]
    fn s1_known_nn() {
        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
            Point::new([5.0, 5.0]),
        ];
        let tree: KdTree<2, 4> = KdTree::construct(&points, Some(([0.0, 0.0], [5.0, 5.0])));
        let nn = tree.nearest_one(&[0.0, 0.0]).unwrap();
        assert!(nn.coords == [1.0, 0.0] || nn.coords == [0.0, 1.0]);
    }

    #[test]
    fn s2_collinear() {
        let points: Vec<Point<2>> = (0..=16).map(|i| Point::new([i as f32, 0.0])).collect();
        let tree: KdTree<2, 4> = KdTree::construct(&points, None);
        let nn = tree.nearest_one(&[8.0, 0.0]).unwrap();
        assert!(nn.coords == [7.0, 0.0] || nn.coords == [9.0, 0.0]);
    }

    #[test]
    fn s3_matches_brute_force_for_1000_random_points_3d() {
        let mut rng = rand::rng();
        let points: Vec<Point<3>> = (0..1000)
            .map(|_| {
                Point::new([
                    rng.random_range(-100.0..100.0),
                    rng.random_range(-100.0..100.0),
                    rng.random_range(-100.0..100.0),
                ])
            })
            .collect();
        let tree: KdTree<3, 8> = KdTree::construct(&points, None);

        for p in &points {
            let expected = brute_force(&points, &p.coords);
            let actual = tree.nearest_one(&p.coords);
            match (expected, actual) {
                (None, None) => {}
                (Some(e), Some(a)) => {
                    let ed = squared_euclidean(&p.coords, &e.coords);
                    let ad = squared_euclidean(&p.coords, &a.coords);
                    assert!((ed - ad).abs() < 1e-3, "expected dist {ed}, got {ad}");
                }
                _ => panic!("mismatch: expected {expected:?}, got {actual:?}"),
            }
        }
    }

    #[test]
    fn s5_duplicates_return_another_duplicate() {
        let mut tree: KdTree<2, 8> = KdTree::new();
        let dupes: Vec<Point<2>> = (0..20).map(|_| Point::new([0.0, 0.0])).collect();
        let extra = Point::new([1.0, 1.0]);
        for p in &dupes {
            tree.add(p);
        }
        tree.add(&extra);

        let nn = tree.nearest_one(&[0.0, 0.0]).unwrap();
        assert_eq!(nn.coords, [0.0, 0.0]);
    }
}
