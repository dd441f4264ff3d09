//! One distance run: ROIs in, ordered marker distances out.
//!
//! The run does not touch any global state. ROIs are classified once by
//! [`RoiKind`]; line ROIs are boundary candidates, point ROIs are markers and
//! area ROIs are skipped.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::calibration::Calibration;
use crate::error::{Error, Result};
use crate::extract::extract_points;
use crate::nearest::measure_all;
use crate::point::PhysicalPoint;
use crate::resample::{resample_polyline, ResampleParams, ResampledPath};
use crate::roi::{Roi, RoiKind};

/// What to do when more than one line ROI is supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundarySelection {
    /// Use the first line ROI and ignore the rest.
    #[default]
    First,
    /// Fail with [`Error::MultipleBoundaries`].
    Strict,
}

/// Parameters for a distance run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub boundary_selection: BoundarySelection,
    pub resample: ResampleParams,
}

/// Distance of one marker to the boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Index of the marker in the input ROI list.
    pub roi_index: usize,
    #[serde(default)]
    pub name: Option<String>,
    /// Calibrated marker position.
    pub point: PhysicalPoint,
    /// Minimum distance in calibration units.
    pub distance: f64,
    /// Boundary sample that achieved `distance`.
    pub nearest: PhysicalPoint,
}

/// Output of a distance run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Index of the boundary ROI in the input list.
    pub boundary_index: usize,
    /// Calibrated boundary vertices.
    pub boundary: Vec<PhysicalPoint>,
    pub path: ResampledPath,
    /// One entry per marker, in input order.
    pub results: Vec<DistanceResult>,
}

/// Vesicle-to-boundary distance analyzer.
#[derive(Clone, Debug, Default)]
pub struct DistanceAnalyzer {
    params: AnalysisParams,
}

impl DistanceAnalyzer {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    /// Run the full pipeline on a set of ROIs.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(rois = rois.len(), unit = calibration.unit()))
    )]
    pub fn analyze(&self, rois: &[Roi], calibration: &Calibration) -> Result<AnalysisOutcome> {
        let boundary_index = self.select_boundary(rois)?;
        let boundary = extract_points(&rois[boundary_index].vertices, calibration);
        let path = resample_polyline(&boundary, calibration, &self.params.resample)?;
        info!(
            "boundary ROI #{boundary_index}: {} vertices -> {} samples",
            boundary.len(),
            path.len()
        );

        let mut markers = Vec::new();
        for (roi_index, roi) in rois.iter().enumerate() {
            match roi.kind {
                RoiKind::Point => {
                    let anchor = roi.anchor().ok_or(Error::EmptyMarker { roi_index })?;
                    markers.push((roi_index, roi, calibration.to_physical(anchor)));
                }
                RoiKind::Area => debug!("ROI #{roi_index}: area selection ignored"),
                RoiKind::Line => {}
            }
        }

        if markers.is_empty() {
            warn!("no point ROIs to measure");
            return Ok(AnalysisOutcome {
                boundary_index,
                boundary,
                path,
                results: Vec::new(),
            });
        }

        let queries: Vec<PhysicalPoint> = markers.iter().map(|(_, _, p)| *p).collect();
        let nearest = measure_all(&queries, &path)?;
        let results = markers
            .into_iter()
            .zip(nearest)
            .map(|((roi_index, roi, point), n)| DistanceResult {
                roi_index,
                name: roi.name.clone(),
                point,
                distance: n.distance,
                nearest: n.point,
            })
            .collect::<Vec<_>>();
        info!("measured {} markers", results.len());

        Ok(AnalysisOutcome {
            boundary_index,
            boundary,
            path,
            results,
        })
    }

    fn select_boundary(&self, rois: &[Roi]) -> Result<usize> {
        let lines: Vec<usize> = rois
            .iter()
            .enumerate()
            .filter(|(_, r)| r.kind == RoiKind::Line)
            .map(|(i, _)| i)
            .collect();

        match (lines.as_slice(), self.params.boundary_selection) {
            ([], _) => Err(Error::MissingBoundaryInput),
            ([only], _) => Ok(*only),
            (many, BoundarySelection::Strict) => {
                Err(Error::MultipleBoundaries { count: many.len() })
            }
            ([first, ..], BoundarySelection::First) => {
                warn!(
                    "{} line ROIs supplied, using #{first} as the boundary",
                    lines.len()
                );
                Ok(*first)
            }
        }
    }
}

/// Run a distance analysis with the given parameters.
pub fn analyze(
    rois: &[Roi],
    calibration: &Calibration,
    params: &AnalysisParams,
) -> Result<AnalysisOutcome> {
    DistanceAnalyzer::new(params.clone()).analyze(rois, calibration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn psd() -> Roi {
        Roi::line([[0.0, 0.0], [10.0, 0.0]]).with_name("psd")
    }

    #[test]
    fn measures_markers_in_input_order() {
        let rois = vec![
            Roi::point(5.0, 3.0).with_name("a"),
            psd(),
            Roi::point(5.0, -7.0).with_name("b"),
            Roi::point(4.0, 1.0).with_name("c"),
        ];
        let cal = Calibration::uncalibrated();
        let out = analyze(&rois, &cal, &AnalysisParams::default()).unwrap();

        assert_eq!(out.boundary_index, 1);
        assert_eq!(out.path.len(), 9);
        let names: Vec<_> = out.results.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec![Some("a"), Some("b"), Some("c")]);
        let idx: Vec<_> = out.results.iter().map(|r| r.roi_index).collect();
        assert_eq!(idx, vec![0, 2, 3]);
        assert_abs_diff_eq!(out.results[0].distance, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.results[1].distance, 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.results[2].distance, 1.0, epsilon = 1e-12);
        assert_eq!(out.results[2].nearest, PhysicalPoint::new(4.0, 0.0));
    }

    #[test]
    fn missing_boundary_fails_before_measuring() {
        let rois = vec![Roi::point(1.0, 1.0)];
        let err = analyze(&rois, &Calibration::uncalibrated(), &AnalysisParams::default());
        assert_eq!(err.unwrap_err(), Error::MissingBoundaryInput);
    }

    #[test]
    fn first_line_wins_unless_strict() {
        let rois = vec![
            Roi::point(0.0, 5.0),
            Roi::line([[0.0, 100.0], [10.0, 100.0]]),
            psd(),
        ];
        let cal = Calibration::uncalibrated();
        let out = analyze(&rois, &cal, &AnalysisParams::default()).unwrap();
        assert_eq!(out.boundary_index, 1);

        let strict = AnalysisParams {
            boundary_selection: BoundarySelection::Strict,
            ..AnalysisParams::default()
        };
        assert_eq!(
            analyze(&rois, &cal, &strict).unwrap_err(),
            Error::MultipleBoundaries { count: 2 }
        );
    }

    #[test]
    fn multi_vertex_marker_uses_first_vertex_and_areas_are_ignored() {
        let rois = vec![
            psd(),
            Roi::new(
                RoiKind::Point,
                vec![[3.0, 2.0].into(), [3.0, 50.0].into()],
            ),
            Roi::new(RoiKind::Area, vec![[0.0, 0.0].into(), [1.0, 1.0].into()]),
        ];
        let out = analyze(&rois, &Calibration::uncalibrated(), &AnalysisParams::default()).unwrap();
        assert_eq!(out.results.len(), 1);
        assert_abs_diff_eq!(out.results[0].distance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_marker_is_reported() {
        let rois = vec![psd(), Roi::new(RoiKind::Point, Vec::new())];
        let err = analyze(&rois, &Calibration::uncalibrated(), &AnalysisParams::default());
        assert_eq!(err.unwrap_err(), Error::EmptyMarker { roi_index: 1 });
    }

    #[test]
    fn collapsed_boundary_is_an_empty_boundary_error() {
        let rois = vec![Roi::line([[2.0, 2.0], [2.0, 2.0]]), Roi::point(0.0, 0.0)];
        let err = analyze(&rois, &Calibration::uncalibrated(), &AnalysisParams::default());
        assert_eq!(err.unwrap_err(), Error::EmptyBoundary);

        let no_markers = analyze(
            &rois[..1],
            &Calibration::uncalibrated(),
            &AnalysisParams::default(),
        )
        .unwrap();
        assert!(no_markers.results.is_empty());
    }
}
