use thiserror::Error;

use wf_core::WfError;
use wf_guidance::GuidanceError;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error(transparent)]
    Core(#[from] WfError),

    #[error(transparent)]
    Guidance(#[from] GuidanceError),

    #[error("trace row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SensorResult<T> = Result<T, SensorError>;
