#![warn(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::private_intra_doc_links)]
#![doc(html_root_url = "https://docs.rs/bkdtree/0.1.0")]
#![doc(issue_tracker_base_url = "https://github.com/sdd/bkdtree/issues/")]

//! # bkdtree
//!
//! A bucketed [k-d tree](https://en.wikipedia.org/wiki/K-d_tree) over
//! `D`-dimensional single-precision points, built for exact nearest-neighbor,
//! k-nearest-neighbor, and fixed-radius queries.
//!
//! bkdtree provides:
//! - Bulk construction from a point slice via sliding-midpoint splits, exposed
//!   as [`KdTree::construct`](`float::kdtree::KdTree::construct`);
//! - Incremental single-point insertion via [`KdTree::add`](`float::kdtree::KdTree::add`);
//! - Exact [`nearest_one`](`float::kdtree::KdTree::nearest_one`), [`nearest_n`](`float::kdtree::KdTree::nearest_n`)
//!   and [`within`](`float::kdtree::KdTree::within`) queries, all self-excluding;
//! - A PLY-style point/line interchange format under [`io::ply`], and a debug
//!   visualization dump for 2D trees under [`viz`].
//!
//! The tree borrows its points rather than owning them: a `KdTree<'p, D, B>`
//! holds `&'p Point<D>` references into caller-owned storage, so the borrow
//! checker enforces "points must outlive the tree" at compile time.
//!
//! ## Usage
//! ```rust
//! use bkdtree::{KdTree, Point};
//!
//! let points = vec![
//!     Point::new([0.0f32, 0.0]),
//!     Point::new([1.0, 0.0]),
//!     Point::new([0.0, 1.0]),
//!     Point::new([5.0, 5.0]),
//! ];
//!
//! let tree: KdTree<2, 4> = KdTree::construct(&points, None);
//! assert_eq!(tree.size(), 4);
//!
//! let nearest = tree.nearest_one(&[0.0, 0.0]).unwrap();
//! assert!(nearest.coords == [1.0, 0.0] || nearest.coords == [0.0, 1.0]);
//! ```
//!
//! ## Optional Features
//! * **tracing** (on by default) - instruments construction, insertion, and
//!   queries with [`tracing`](https://docs.rs/tracing/latest/tracing/) spans
//!   and events.

pub mod distance;
pub mod error;
pub mod float;
pub mod io;
pub mod nearest_neighbour;
pub mod point;
pub(crate) mod tracking;
pub mod viz;

pub use error::PlyError;
pub use float::kdtree::KdTree;
pub use nearest_neighbour::NearestNeighbour;
pub use point::Point;
