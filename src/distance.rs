//! Squared-Euclidean distance helpers used throughout construction and querying.
//!
//! Internal comparisons always use squared distances, per the numeric semantics
//! of the tree: square roots are only ever taken at the edge of the public API
//! (sizing the expanding radius in [`crate::float::query::nearest_n`]).

#[inline]
pub(crate) fn squared_euclidean<const D: usize>(a: &[f32; D], b: &[f32; D]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum()
}

/// Squared distance from `q` to its nearest point on the axis-aligned box
/// `[min, max]`; zero if `q` is inside the box on every axis. Used by the BOB
/// test.
#[inline]
pub(crate) fn squared_dist_to_bounds<const D: usize>(
    q: &[f32; D],
    min: &[f32; D],
    max: &[f32; D],
) -> f32 {
    let mut acc = 0.0f32;
    for d in 0..D {
        if q[d] < min[d] {
            let diff = min[d] - q[d];
            acc += diff * diff;
        } else if q[d] > max[d] {
            let diff = q[d] - max[d];
            acc += diff * diff;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_euclidean_basic() {
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }

    #[test]
    fn dist_to_bounds_inside_is_zero() {
        let min = [0.0, 0.0];
        let max = [10.0, 10.0];
        assert_eq!(squared_dist_to_bounds(&[5.0, 5.0], &min, &max), 0.0);
    }

    #[test]
    fn dist_to_bounds_outside() {
        let min = [0.0, 0.0];
        let max = [10.0, 10.0];
        assert_eq!(squared_dist_to_bounds(&[13.0, 0.0], &min, &max), 9.0);
        assert_eq!(squared_dist_to_bounds(&[-2.0, -3.0], &min, &max), 13.0);
    }
}
