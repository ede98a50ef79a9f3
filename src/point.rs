//! The point type stored in the tree.

/// A point in `D`-dimensional space, plus an auxiliary display color.
///
/// The tree only ever reads `coords`; `color` is opaque payload carried
/// through for callers that use [`crate::io::ply`] or [`crate::viz`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<const D: usize> {
    /// The point's coordinates.
    pub coords: [f32; D],
    /// An auxiliary RGB color, unused by the index itself.
    pub color: [u8; 3],
}

impl<const D: usize> Point<D> {
    /// Creates a point with the default (black) color.
    pub fn new(coords: [f32; D]) -> Self {
        Self {
            coords,
            color: [0, 0, 0],
        }
    }

    /// Creates a point with an explicit color.
    pub fn with_color(coords: [f32; D], color: [u8; 3]) -> Self {
        Self { coords, color }
    }
}

impl<const D: usize> From<[f32; D]> for Point<D> {
    fn from(coords: [f32; D]) -> Self {
        Self::new(coords)
    }
}

impl<const D: usize> std::ops::Index<usize> for Point<D> {
    type Output = f32;

    fn index(&self, axis: usize) -> &f32 {
        &self.coords[axis]
    }
}
