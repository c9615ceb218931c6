//! Catalog error type.

use thiserror::Error;

use wf_core::{PointId, WfError};

/// Errors produced while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Core(#[from] WfError),

    #[error("duplicate point id {0}")]
    DuplicatePointId(PointId),

    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
