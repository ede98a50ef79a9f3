//! The bucketed k-d tree over single-precision floating point coordinates.
//!
//! This is the only tree variant this crate provides (no fixed-point, no
//! immutable/rkyv-backed variant); the module is still named `float` to keep
//! the layout familiar to readers of the wider k-d tree ecosystem.

pub mod construction;
pub mod insert;
pub mod kdtree;
pub mod query;
