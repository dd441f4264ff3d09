//! Calibrated vesicle-to-boundary distances for microscopy annotations.
//!
//! The crate is purely computational. The host application supplies ROIs in
//! pixel coordinates and a per-axis [`Calibration`]; everything downstream of
//! [`extract_points`] works in physical units.
//!
//! ## Pipeline
//! - [`extract_points`]: pixel vertex chain -> calibrated chain.
//! - [`resample_polyline`]: calibrated boundary -> dense [`ResampledPath`],
//!   one sample per calibrated pixel step, segment endpoints excluded.
//! - [`nearest_distance`] / [`measure_all`]: linear nearest-sample scan.
//! - [`DistanceAnalyzer`]: the whole run over a list of [`Roi`]s.
//!
//! ```
//! use vesicle_distance_core::{analyze, AnalysisParams, Calibration, Roi};
//!
//! let rois = vec![
//!     Roi::line([[0.0, 0.0], [10.0, 0.0]]),
//!     Roi::point(4.0, 3.0),
//! ];
//! let cal = Calibration::isotropic(2.0, "nm")?;
//! let out = analyze(&rois, &cal, &AnalysisParams::default())?;
//! assert!((out.results[0].distance - 6.0).abs() < 1e-9);
//! # Ok::<(), vesicle_distance_core::Error>(())
//! ```

mod analysis;
mod calibration;
mod error;
mod extract;
mod logger;
mod nearest;
mod point;
mod resample;
mod roi;

pub use analysis::{
    analyze, AnalysisOutcome, AnalysisParams, BoundarySelection, DistanceAnalyzer, DistanceResult,
};
pub use calibration::{Calibration, CalibrationSpec};
pub use error::{Error, Result};
pub use extract::extract_points;
pub use nearest::{measure_all, nearest_distance, nearest_sample, NearestSample};
pub use point::{PhysicalPoint, PixelPoint};
pub use resample::{resample_polyline, ResampleParams, ResampledPath};
pub use roi::{Roi, RoiKind};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
