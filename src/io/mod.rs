//! On-disk interchange format for point sets and line segments.

pub mod ply;
