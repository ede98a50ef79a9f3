//! k-Nearest-Neighbors via an expand-and-query strategy built atop
//! `nearest_one` and `within`.

use crate::distance::squared_euclidean;
use crate::float::kdtree::KdTree;
use crate::nearest_neighbour::NearestNeighbour;

const MAX_ITERATIONS: usize = 100;

impl<'p, const D: usize, const B: usize> KdTree<'p, D, B> {
    /// Returns the `k` points nearest to `q`, excluding `q` itself, sorted by
    /// ascending distance. If the tree holds fewer than `k + 1` points, all
    /// non-self points are returned.
    pub fn nearest_n(&self, q: &[f32; D], k: usize) -> Vec<NearestNeighbour<'p, D>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("nearest_n", k).entered();

        let Some(seed) = self.nearest_one(q) else {
            return Vec::new();
        };

        let seed_dist = squared_euclidean(q, &seed.coords).sqrt();
        let growth = 1.0 + 1.0 / D as f32;
        let mut radius = seed_dist * (1.0 + 2.0 / D as f32);
        if radius <= 0.0 {
            radius = f32::EPSILON;
        }

        let mut found = self.within(q, radius);
        let mut iterations = 0;
        while found.len() <= k && iterations < MAX_ITERATIONS {
            let prev_count = found.len();
            radius *= growth;
            found = self.within(q, radius);
            iterations += 1;
            if found.len() == prev_count {
                // Radius growth turned up nothing new: the whole tree is
                // already covered.
                break;
            }
        }

        found.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap());
        found.truncate(k);

        #[cfg(feature = "tracing")]
        tracing::trace!(returned = found.len(), "nearest_n found");

        found
    }
}
