//! Builds a tree from randomly generated 2D points, runs a handful of
//! nearest-neighbor, k-nearest-neighbor, and radius queries against it, and
//! optionally writes a visualization dump.
//!
//! Run with `cargo run --bin demo -- --dump <prefix>` to also write
//! `<prefix>points.ply` and `<prefix>lines.ply`.

use bkdtree::{viz, KdTree, Point};
use rand::Rng;

const POINT_COUNT: usize = 2_000;
const BUCKET_SIZE: usize = 32;

fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt::init();

    let mut rng = rand::rng();
    let points: Vec<Point<2>> = (0..POINT_COUNT)
        .map(|_| Point::new([rng.random_range(-1000.0..1000.0), rng.random_range(-1000.0..1000.0)]))
        .collect();

    let tree: KdTree<2, BUCKET_SIZE> = KdTree::construct(&points, None);
    println!("built a tree over {} points", tree.size());

    let query = [0.0, 0.0];

    if let Some(nn) = tree.nearest_one(&query) {
        println!("nearest to {query:?}: {:?}", nn.coords);
    }

    let knn = tree.nearest_n(&query, 5);
    println!("5 nearest to {query:?}:");
    for n in &knn {
        println!("  {:?} (dist^2 = {})", n.item.coords, n.distance);
    }

    let within = tree.within(&query, 50.0);
    println!("{} points within radius 50 of {query:?}", within.len());

    if let Some(prefix) = std::env::args().nth(1).filter(|a| a == "--dump").and_then(|_| std::env::args().nth(2)) {
        viz::dump_tree(&tree, &prefix).expect("failed to write visualization dump");
        println!("wrote {prefix}points.ply and {prefix}lines.ply");
    }
}
