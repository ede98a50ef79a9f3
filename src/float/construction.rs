//! Bulk construction via sliding-midpoint partitioning, using an explicit work
//! stack rather than recursion.

use crate::float::kdtree::{KdTree, LeafNode, NodeRef, StemNode};
use crate::point::Point;

struct BuildFrame<'p, const D: usize> {
    points: Vec<&'p Point<D>>,
    bounds_min: [f32; D],
    bounds_max: [f32; D],
    /// Index of the (already-allocated, placeholder) stem this frame fills in.
    stem_idx: usize,
}

impl<'p, const D: usize, const B: usize> KdTree<'p, D, B> {
    /// Builds a tree from scratch over `points`, replacing any existing
    /// structure (in the Rust idiom: this returns a brand new tree; assigning
    /// it over an existing binding drops the old one).
    ///
    /// `bounds`, if given, is the `(min, max)` hyper-rectangle used to choose
    /// the first split; if omitted, the tight bounding box of `points` is
    /// used. Bounds with `min[d] > max[d]` on any axis, or an empty `points`
    /// slice, yield an empty tree.
    pub fn construct(points: &'p [Point<D>], bounds: Option<([f32; D], [f32; D])>) -> Self {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("construct", points = points.len(), bucket_size = B).entered();

        if points.is_empty() {
            return Self::new();
        }

        let (bounds_min, bounds_max) = bounds.unwrap_or_else(|| tight_bounds(points));
        for d in 0..D {
            if bounds_min[d] > bounds_max[d] {
                return Self::new();
            }
        }

        let mut tree = Self::new();
        tree.len = points.len();
        for p in points {
            tree.extend_overall_bounds(p);
        }

        if points.len() == 1 {
            let mut leaf: LeafNode<D, B> = LeafNode::new_empty();
            leaf.push(&points[0]);
            tree.leaves.push(leaf);
            tree.stems.push(StemNode {
                dim: 0,
                split: points[0].coords[0],
                left: Some(NodeRef::Leaf(0)),
                right: None,
            });
            tree.root = Some(NodeRef::Stem(0));
            return tree;
        }

        tree.stems.push(StemNode {
            dim: 0,
            split: 0.0,
            left: None,
            right: None,
        });
        tree.root = Some(NodeRef::Stem(0));

        let mut stack = vec![BuildFrame {
            points: points.iter().collect(),
            bounds_min,
            bounds_max,
            stem_idx: 0,
        }];

        while let Some(frame) = stack.pop() {
            let dim = longest_axis(&frame.bounds_min, &frame.bounds_max);
            let extent = frame.bounds_max[dim] - frame.bounds_min[dim];
            let midpoint = frame.bounds_min[dim] + extent / 2.0;

            let mut left = Vec::new();
            let mut right = Vec::new();
            let mut lmax = f32::NEG_INFINITY;
            let mut rmin = f32::INFINITY;
            for &p in &frame.points {
                if p.coords[dim] <= midpoint {
                    if p.coords[dim] > lmax {
                        lmax = p.coords[dim];
                    }
                    left.push(p);
                } else {
                    if p.coords[dim] < rmin {
                        rmin = p.coords[dim];
                    }
                    right.push(p);
                }
            }

            let split = if right.is_empty() {
                lmax
            } else if left.is_empty() {
                rmin
            } else {
                midpoint
            };

            // Degenerate case: every point is coordinate-identical on every
            // axis, so no split can make progress. Emit a single oversized
            // leaf instead of recursing forever (see DESIGN.md).
            if left.len() == frame.points.len() || right.len() == frame.points.len() {
                let mut leaf: LeafNode<D, B> = LeafNode::new_empty();
                for p in &frame.points {
                    leaf.push(p);
                }
                let leaf_idx = tree.leaves.len();
                tree.leaves.push(leaf);
                let stem = &mut tree.stems[frame.stem_idx];
                stem.dim = dim;
                stem.split = split;
                stem.left = Some(NodeRef::Leaf(leaf_idx));
                stem.right = None;
                continue;
            }

            let stem = &mut tree.stems[frame.stem_idx];
            stem.dim = dim;
            stem.split = split;

            if !left.is_empty() {
                let mut left_max = frame.bounds_max;
                left_max[dim] = split;
                let child_ref = place_child(&mut tree, left, frame.bounds_min, left_max, &mut stack);
                tree.stems[frame.stem_idx].left = Some(child_ref);
            }
            if !right.is_empty() {
                let mut right_min = frame.bounds_min;
                right_min[dim] = split;
                let child_ref = place_child(&mut tree, right, right_min, frame.bounds_max, &mut stack);
                tree.stems[frame.stem_idx].right = Some(child_ref);
            }
        }

        tree
    }
}

fn place_child<'p, const D: usize, const B: usize>(
    tree: &mut KdTree<'p, D, B>,
    points: Vec<&'p Point<D>>,
    bounds_min: [f32; D],
    bounds_max: [f32; D],
    stack: &mut Vec<BuildFrame<'p, D>>,
) -> NodeRef {
    if points.len() > B {
        let stem_idx = tree.stems.len();
        tree.stems.push(StemNode {
            dim: 0,
            split: 0.0,
            left: None,
            right: None,
        });
        stack.push(BuildFrame {
            points,
            bounds_min,
            bounds_max,
            stem_idx,
        });
        NodeRef::Stem(stem_idx)
    } else {
        let mut leaf: LeafNode<D, B> = LeafNode::new_empty();
        for p in points {
            leaf.push(p);
        }
        let leaf_idx = tree.leaves.len();
        tree.leaves.push(leaf);
        NodeRef::Leaf(leaf_idx)
    }
}

fn longest_axis<const D: usize>(min: &[f32; D], max: &[f32; D]) -> usize {
    let mut best_axis = 0;
    let mut best_extent = max[0] - min[0];
    for d in 1..D {
        let extent = max[d] - min[d];
        if extent > best_extent {
            best_extent = extent;
            best_axis = d;
        }
    }
    best_axis
}

pub(crate) fn tight_bounds<const D: usize>(points: &[Point<D>]) -> ([f32; D], [f32; D]) {
    let mut min = [f32::INFINITY; D];
    let mut max = [f32::NEG_INFINITY; D];
    for p in points {
        for d in 0..D {
            if p.coords[d] < min[d] {
                min[d] = p.coords[d];
            }
            if p.coords[d] > max[d] {
                max[d] = p.coords[d];
            }
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_tree() {
        let points: [Point<2>; 0] = [];
        let tree: KdTree<2, 4> = KdTree::construct(&points, None);
        assert!(tree.is_empty());
    }

    #[test]
    fn single_point_wraps_in_root_stem() {
        let points = [Point::new([1.0, 2.0])];
        let tree: KdTree<2, 4> = KdTree::construct(&points, None);
        assert_eq!(tree.size(), 1);
        match tree.root() {
            Some(NodeRef::Stem(idx)) => {
                let stem = tree.stem(idx);
                assert_eq!(stem.left, Some(NodeRef::Leaf(0)));
                assert_eq!(stem.right, None);
            }
            other => panic!("expected root stem, got {other:?}"),
        }
    }

    #[test]
    fn malformed_bounds_yield_empty_tree() {
        let points = [Point::new([1.0, 2.0]), Point::new([3.0, 4.0])];
        let bounds = ([5.0, 0.0], [0.0, 10.0]);
        let tree: KdTree<2, 4> = KdTree::construct(&points, Some(bounds));
        assert!(tree.is_empty());
    }

    #[test]
    fn bucket_size_is_respected() {
        let points: Vec<Point<2>> = (0..40)
            .map(|i| Point::new([i as f32, (i * 3 % 17) as f32]))
            .collect();
        let tree: KdTree<2, 8> = KdTree::construct(&points, None);
        assert_eq!(tree.size(), 40);
        for leaf in &tree.leaves {
            assert!(leaf.len() <= 8);
        }
    }

    #[test]
    fn degenerate_duplicates_do_not_loop_forever() {
        let points: Vec<Point<2>> = (0..40).map(|_| Point::new([0.0, 0.0])).collect();
        let tree: KdTree<2, 8> = KdTree::construct(&points, None);
        assert_eq!(tree.size(), 40);
    }
}
