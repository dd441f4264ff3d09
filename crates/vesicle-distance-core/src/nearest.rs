//! Brute-force nearest-sample search.

use serde::{Deserialize, Serialize};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{Error, Result};
use crate::point::PhysicalPoint;
use crate::resample::ResampledPath;

/// Closest path sample to a query point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestSample {
    /// Euclidean distance in calibration units.
    pub distance: f64,
    /// Index into the path; the first one on ties.
    pub index: usize,
    pub point: PhysicalPoint,
}

/// Linear scan for the closest sample.
pub fn nearest_sample(query: &PhysicalPoint, path: &ResampledPath) -> Result<NearestSample> {
    let samples = path.samples();
    let first = samples.first().ok_or(Error::EmptyBoundary)?;

    let mut best = NearestSample {
        distance: query.distance(first),
        index: 0,
        point: *first,
    };
    for (index, sample) in samples.iter().enumerate().skip(1) {
        let d = query.distance(sample);
        if d < best.distance {
            best = NearestSample {
                distance: d,
                index,
                point: *sample,
            };
        }
    }
    Ok(best)
}

/// Minimum distance from `query` to any sample of `path`.
#[inline]
pub fn nearest_distance(query: &PhysicalPoint, path: &ResampledPath) -> Result<f64> {
    nearest_sample(query, path).map(|n| n.distance)
}

/// Nearest sample for every query, in query order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(queries = queries.len(), samples = path.len()))
)]
pub fn measure_all(queries: &[PhysicalPoint], path: &ResampledPath) -> Result<Vec<NearestSample>> {
    if path.is_empty() {
        return Err(Error::EmptyBoundary);
    }

    #[cfg(feature = "rayon")]
    let out: Result<Vec<_>> = queries
        .par_iter()
        .map(|q| nearest_sample(q, path))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let out: Result<Vec<_>> = queries.iter().map(|q| nearest_sample(q, path)).collect();

    out
}
