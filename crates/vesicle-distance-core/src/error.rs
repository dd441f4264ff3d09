/// Errors produced by the distance pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid calibration: {reason}")]
    InvalidCalibration { reason: String },
    #[error("resampled boundary is empty")]
    EmptyBoundary,
    #[error("no line ROI was supplied for the boundary")]
    MissingBoundaryInput,
    #[error("expected exactly one boundary line ROI, got {count}")]
    MultipleBoundaries { count: usize },
    #[error("marker ROI #{roi_index} has no vertices")]
    EmptyMarker { roi_index: usize },
    #[error("resampling would emit more than {limit} samples")]
    SampleBudgetExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
