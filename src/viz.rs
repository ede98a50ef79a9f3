//! Debug visualization dumps for 2D trees: one PLY point cloud colored by
//! bucket, and one PLY line set tracing splitting planes and the tree's
//! overall bounding box.
//!
//! Leaf colors are derived deterministically from the leaf's arena index
//! (a multiplicative hash), unlike the original tool which reseeds `rand()`
//! per dump; this makes repeated dumps of the same tree byte-identical,
//! which is worth more than the original's cosmetic color variety.

use crate::error::PlyError;
use crate::float::kdtree::{KdTree, NodeRef};
use crate::io::ply;
use crate::point::Point;

/// Writes `{prefix}points.ply` (points colored per bucket) and
/// `{prefix}lines.ply` (splitting planes plus the overall bounding box).
pub fn dump_tree<const B: usize>(tree: &KdTree<'_, 2, B>, prefix: &str) -> Result<(), PlyError> {
    ply::write_points(format!("{prefix}points.ply"), &colored_buckets(tree))?;

    let (min, max) = tree.bounding_box();
    let mut segments = splitting_plane_segments(tree, min, max);
    segments.extend(bounding_box_segments(min, max));
    ply::write_lines(format!("{prefix}lines.ply"), &segments)?;
    Ok(())
}

/// Every point in the tree, colored by which leaf bucket holds it.
pub fn colored_buckets<const B: usize>(tree: &KdTree<'_, 2, B>) -> Vec<Point<2>> {
    let mut out = Vec::new();
    let Some(root) = tree.root() else {
        return out;
    };

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            NodeRef::Leaf(idx) => {
                let leaf = tree.leaf(idx);
                let color = leaf_color(idx);
                for p in leaf.iter() {
                    out.push(Point::with_color(p.coords, color));
                }
            }
            NodeRef::Stem(idx) => {
                let stem = tree.stem(idx);
                if let Some(l) = stem.left {
                    stack.push(l);
                }
                if let Some(r) = stem.right {
                    stack.push(r);
                }
            }
        }
    }
    out
}

fn leaf_color(idx: usize) -> [u8; 3] {
    let h = (idx as u64).wrapping_mul(2654435761).wrapping_add(0x9E3779B9);
    [(h & 0xFF) as u8, ((h >> 8) & 0xFF) as u8, ((h >> 16) & 0xFF) as u8]
}

/// One line segment (two points) per Stem, spanning the portion of its
/// splitting plane that bounds its subtree.
pub fn splitting_plane_segments<const B: usize>(
    tree: &KdTree<'_, 2, B>,
    min: [f32; 2],
    max: [f32; 2],
) -> Vec<Point<2>> {
    let mut out = Vec::new();
    if let Some(NodeRef::Stem(idx)) = tree.root() {
        collect_segments(tree, idx, min, max, &mut out);
    }
    out
}

fn collect_segments<const B: usize>(
    tree: &KdTree<'_, 2, B>,
    stem_idx: usize,
    min: [f32; 2],
    max: [f32; 2],
    out: &mut Vec<Point<2>>,
) {
    let stem = tree.stem(stem_idx);
    let other = 1 - stem.dim;

    let mut a = [0f32; 2];
    let mut b = [0f32; 2];
    a[stem.dim] = stem.split;
    a[other] = min[other];
    b[stem.dim] = stem.split;
    b[other] = max[other];
    out.push(Point::with_color(a, [255, 255, 255]));
    out.push(Point::with_color(b, [255, 255, 255]));

    if let Some(NodeRef::Stem(left_idx)) = stem.left {
        let mut left_max = max;
        left_max[stem.dim] = stem.split;
        collect_segments(tree, left_idx, min, left_max, out);
    }
    if let Some(NodeRef::Stem(right_idx)) = stem.right {
        let mut right_min = min;
        right_min[stem.dim] = stem.split;
        collect_segments(tree, right_idx, right_min, max, out);
    }
}

fn bounding_box_segments(min: [f32; 2], max: [f32; 2]) -> Vec<Point<2>> {
    let corner = |x: f32, y: f32| Point::with_color([x, y], [255, 255, 255]);
    vec![
        corner(min[0], min[1]),
        corner(min[0], max[1]),
        corner(min[0], max[1]),
        corner(max[0], max[1]),
        corner(max[0], max[1]),
        corner(max[0], min[1]),
        corner(max[0], min[1]),
        corner(min[0], min[1]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_buckets_covers_every_point() {
        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
            Point::new([5.0, 5.0]),
            Point::new([6.0, 6.0]),
        ];
        let tree: KdTree<2, 2> = KdTree::construct(&points, None);
        let dumped = colored_buckets(&tree);
        assert_eq!(dumped.len(), points.len());
    }

    #[test]
    fn segments_count_matches_stem_count() {
        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
            Point::new([5.0, 5.0]),
            Point::new([6.0, 6.0]),
        ];
        let tree: KdTree<2, 2> = KdTree::construct(&points, None);
        let (min, max) = tree.bounding_box();
        let segments = splitting_plane_segments(&tree, min, max);
        assert_eq!(segments.len(), tree.stems.len() * 2);
    }

    #[test]
    fn empty_tree_yields_no_segments() {
        let tree: KdTree<2, 4> = KdTree::new();
        let (min, max) = tree.bounding_box();
        assert!(splitting_plane_segments(&tree, min, max).is_empty());
        assert!(colored_buckets(&tree).is_empty());
    }
}
