//! Incremental insertion with split-on-overflow.

use crate::float::kdtree::{KdTree, LeafNode, NodeRef, StemNode};
use crate::point::Point;

enum Side {
    Left,
    Right,
}

impl<'p, const D: usize, const B: usize> KdTree<'p, D, B> {
    /// Inserts a single point into the tree, splitting the receiving leaf if
    /// it would overflow past `B` points.
    pub fn add(&mut self, point: &'p Point<D>) {
        #[cfg(feature = "tracing")]
        tracing::trace!(coords = ?point.coords, "add");

        self.extend_overall_bounds(point);
        self.len += 1;

        let Some(root) = self.root else {
            let mut leaf: LeafNode<D, B> = LeafNode::new_empty();
            leaf.push(point);
            self.leaves.push(leaf);
            self.root = Some(NodeRef::Leaf(0));
            return;
        };

        // Descend, recording the path so we can splice a split back in
        // without parent back-references.
        let mut node = root;
        let mut path: Vec<(usize, Side)> = Vec::new();
        let leaf_idx = loop {
            match node {
                NodeRef::Leaf(idx) => break idx,
                NodeRef::Stem(idx) => {
                    let stem = &self.stems[idx];
                    let go_left = point.coords[stem.dim] <= stem.split;
                    let (wanted, side) = if go_left {
                        (stem.left, Side::Left)
                    } else {
                        (stem.right, Side::Right)
                    };
                    let next = wanted.or(stem.left).or(stem.right).expect("stem with no children");
                    path.push((idx, side));
                    node = next;
                }
            }
        };

        if self.leaves[leaf_idx].len() < B {
            self.leaves[leaf_idx].push(point);
            return;
        }

        self.split_leaf(leaf_idx, point, &path);
    }

    fn split_leaf(&mut self, leaf_idx: usize, new_point: &'p Point<D>, path: &[(usize, Side)]) {
        #[cfg(feature = "tracing")]
        tracing::trace!(leaf_idx, "splitting overflowing leaf");

        let mut all: Vec<&'p Point<D>> = self.leaves[leaf_idx].iter().collect();
        all.push(new_point);

        let mut min = [f32::INFINITY; D];
        let mut max = [f32::NEG_INFINITY; D];
        for p in &all {
            for d in 0..D {
                if p.coords[d] < min[d] {
                    min[d] = p.coords[d];
                }
                if p.coords[d] > max[d] {
                    max[d] = p.coords[d];
                }
            }
        }

        let mut dim = 0;
        let mut best_extent = max[0] - min[0];
        for d in 1..D {
            let extent = max[d] - min[d];
            if extent > best_extent {
                best_extent = extent;
                dim = d;
            }
        }
        let split = min[dim] + (max[dim] - min[dim]) / 2.0;

        let mut left: LeafNode<D, B> = LeafNode::new_empty();
        let mut right_points = Vec::new();
        for p in &all {
            if p.coords[dim] <= split {
                left.push(p);
            } else {
                right_points.push(*p);
            }
        }

        let right_ref = if right_points.is_empty() {
            None
        } else {
            let mut right: LeafNode<D, B> = LeafNode::new_empty();
            for p in right_points {
                right.push(p);
            }
            let idx = self.leaves.len();
            self.leaves.push(right);
            Some(NodeRef::Leaf(idx))
        };

        self.leaves[leaf_idx] = left;

        let new_stem = StemNode {
            dim,
            split,
            left: Some(NodeRef::Leaf(leaf_idx)),
            right: right_ref,
        };
        let new_stem_idx = self.stems.len();
        self.stems.push(new_stem);
        let new_ref = NodeRef::Stem(new_stem_idx);

        match path.last() {
            Some((parent_idx, side)) => {
                let parent = &mut self.stems[*parent_idx];
                match side {
                    Side::Left => parent.left = Some(new_ref),
                    Side::Right => parent.right = Some(new_ref),
                }
            }
            None => self.root = Some(new_ref),
        }
    }
}
