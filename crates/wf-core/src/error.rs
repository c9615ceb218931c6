//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `WfError` as one variant
//! via `#[from]`, so geodesic failures propagate with `?` unchanged.

use thiserror::Error;

/// The top-level error type for `wf-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WfError {
    /// Latitude outside `[-90, 90]`, longitude outside `[-180, 180]`, or a
    /// non-finite component.  Never silently clamped.
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `wf-*` crates.
pub type WfResult<T> = Result<T, WfError>;
