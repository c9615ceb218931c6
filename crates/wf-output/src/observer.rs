//! `GuidanceOutputObserver<W>`: bridges `GuidanceObserver` to an `OutputWriter`.

use tracing::debug;

use wf_core::Timestamp;
use wf_guidance::{Alert, GuidanceObserver, GuidanceView, SessionSummary};

use crate::row::{AlertRow, PositionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Position rows buffered before one `write_positions` call.
const POSITION_BATCH: usize = 256;

/// A [`GuidanceObserver`] that records alerts and positions to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  Check with [`take_error`][Self::take_error] after
/// the session ends.
pub struct GuidanceOutputObserver<W: OutputWriter> {
    writer:     W,
    positions:  Vec<PositionRow>,
    alerts:     u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> GuidanceOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            positions:  Vec::with_capacity(POSITION_BATCH),
            alerts:     0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn alerts_written(&self) -> u64 {
        self.alerts
    }

    /// Write buffered positions and finish the writer.  Called automatically
    /// when the session ends.
    pub fn finish(&mut self) {
        self.flush_positions();
        let result = self.writer.finish();
        self.store_err(result);
    }

    fn flush_positions(&mut self) {
        if self.positions.is_empty() {
            return;
        }
        let result = self.writer.write_positions(&self.positions);
        self.positions.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> GuidanceObserver for GuidanceOutputObserver<W> {
    fn on_location(&mut self, at: Timestamp, view: &GuidanceView) {
        let Some(loc) = view.location else { return };
        self.positions.push(PositionRow {
            at_ms:       at.0,
            lat:         loc.lat,
            lon:         loc.lon,
            distance_m:  view.distance_m,
            bearing_deg: view.bearing_deg,
            heading_deg: view.heading_deg,
        });
        if self.positions.len() >= POSITION_BATCH {
            self.flush_positions();
        }
    }

    fn on_alert(&mut self, alert: &Alert, _voice_enabled: bool) {
        let row = AlertRow {
            at_ms:    alert.set_at.0,
            point_id: alert.point_id.to_string(),
            category: alert.category.to_string(),
            message:  alert.message.clone(),
        };
        let result = self.writer.write_alert(&row);
        self.alerts += 1;
        self.store_err(result);
    }

    fn on_session_end(&mut self, summary: &SessionSummary) {
        debug!(alerts = self.alerts, announced = summary.announced, "closing guidance output");
        self.finish();
    }
}
