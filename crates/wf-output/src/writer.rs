//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AlertRow, OutputResult, PositionRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by the observer and retrieved with
/// [`GuidanceOutputObserver::take_error`][crate::GuidanceOutputObserver::take_error].
pub trait OutputWriter {
    fn write_alert(&mut self, row: &AlertRow) -> OutputResult<()>;

    /// Write a batch of position rows.
    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
