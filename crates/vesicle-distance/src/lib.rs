//! Vesicle-to-boundary distance analysis for calibrated microscopy sessions.
//!
//! This crate provides:
//! - re-exports of the computational core (`vesicle-distance-core`),
//! - JSON session loading ([`Session`]) and report output ([`DistanceReport`]),
//! - (feature `cli`) the `vesicle-distance` command-line tool.
//!
//! ## Quickstart
//!
//! ```no_run
//! use vesicle_distance::Session;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::load_json("session.json")?;
//! let report = session.run()?;
//! report.write_text(std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `vesicle_distance::core`: calibration, resampling, nearest-distance search.
//! - [`Session`]: host-exported ROIs plus calibration, as JSON.
//! - [`DistanceReport`]: text (`"<point>\t<distance>"`) and JSON output.

pub use vesicle_distance_core as core;

pub use vesicle_distance_core::{
    analyze, AnalysisOutcome, AnalysisParams, BoundarySelection, Calibration, DistanceAnalyzer,
    DistanceResult, Error, PhysicalPoint, PixelPoint, Roi, RoiKind,
};

mod io;
mod report;

pub use io::{AnalysisOverrides, Session, SessionIoError};
pub use report::{DistanceReport, TEXT_HEADER};
