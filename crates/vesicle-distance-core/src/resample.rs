//! Fixed-step resampling of an open polyline.
//!
//! Each segment `(p_i, p_{i+1})` of the calibrated chain is walked from `p_i`
//! in steps of `inc = cal.to_physical_delta((p_{i+1} - p_i) / |p_{i+1} - p_i|)`
//! and every step strictly closer to `p_i` than the segment length is kept.
//! Segment endpoints are never emitted and coincident vertices contribute
//! nothing.
//!
//! ## Anisotropic calibration
//! The step is a calibrated unit direction scaled by the calibration a second
//! time. With equal scale factors this is exactly one pixel of physical length
//! along the segment. With unequal factors the spacing is biased along the
//! axis with the larger factor; distances stay valid but sample density is
//! not uniform across segments of different direction.

use log::trace;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::calibration::Calibration;
use crate::error::{Error, Result};
use crate::point::PhysicalPoint;

/// Resampling limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleParams {
    /// Upper bound on the total number of emitted samples.
    pub max_samples: usize,
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            max_samples: 1_000_000,
        }
    }
}

/// Dense sample sequence approximating a boundary, in physical units.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResampledPath {
    samples: Vec<PhysicalPoint>,
}

impl ResampledPath {
    pub fn from_samples(samples: Vec<PhysicalPoint>) -> Self {
        Self { samples }
    }

    #[inline]
    pub fn samples(&self) -> &[PhysicalPoint] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Resample a calibrated open chain at a near-constant physical step.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(vertices = chain.len()))
)]
pub fn resample_polyline(
    chain: &[PhysicalPoint],
    calibration: &Calibration,
    params: &ResampleParams,
) -> Result<ResampledPath> {
    let mut samples = Vec::new();

    for (i, pair) in chain.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        let delta = end.offset_from(&start);
        let seg_len = delta.norm();
        if seg_len == 0.0 {
            trace!("segment {i}: coincident vertices, skipped");
            continue;
        }

        let inc = calibration.to_physical_delta(delta / seg_len);
        let expected = predicted_steps(seg_len, inc.norm());
        if expected > params.max_samples.saturating_sub(samples.len()) {
            return Err(Error::SampleBudgetExceeded {
                limit: params.max_samples,
            });
        }

        let before = samples.len();
        samples.reserve(expected);
        let mut k = 1.0_f64;
        loop {
            let candidate = start.translated(&(inc * k));
            if start.distance(&candidate) >= seg_len {
                break;
            }
            if samples.len() == params.max_samples {
                return Err(Error::SampleBudgetExceeded {
                    limit: params.max_samples,
                });
            }
            samples.push(candidate);
            k += 1.0;
        }
        trace!(
            "segment {i}: length {seg_len:.4}, step {:.4}, {} samples",
            inc.norm(),
            samples.len() - before
        );
    }

    Ok(ResampledPath::from_samples(samples))
}

/// Samples a segment of `seg_len` emits at `step` under the `< seg_len` stop rule.
fn predicted_steps(seg_len: f64, step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return usize::MAX;
    }
    let n = ((seg_len / step).ceil() - 1.0).max(0.0);
    if n.is_finite() && n < usize::MAX as f64 {
        n as usize
    } else {
        usize::MAX
    }
}
