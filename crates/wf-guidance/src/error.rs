use thiserror::Error;

use wf_core::WfError;

#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error(transparent)]
    Core(#[from] WfError),

    #[error("point {0} is not in the session catalog")]
    UnknownPoint(String),
}

pub type GuidanceResult<T> = Result<T, GuidanceError>;
