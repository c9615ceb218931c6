//! `Replay`: drive a guidance session from a recorded or synthetic stream.
//!
//! The replay stands in for the host event loop.  Samples are grouped into
//! delivery windows of `window_ms`: every sample arriving while the previous
//! window is being applied waits in a [`SampleQueue`], which may coalesce
//! them.  Before each sample is applied, any alert expiry due at or before
//! the sample's timestamp fires, exactly as a host timer armed for
//! [`GuidanceSession::next_deadline`] would have.

use tracing::{debug, info, warn};

use wf_core::{Timestamp, WfError};
use wf_guidance::{GuidanceError, GuidanceObserver, GuidanceSession};

use crate::{DeliveryPolicy, Reading, SampleQueue, SensorResult, SensorSample};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Samples offered to the replay.
    pub samples:   usize,
    pub locations: u64,
    pub headings:  u64,
    /// Location samples the session rejected as invalid coordinates.
    pub rejected:  u64,
    /// Samples replaced by a newer one before being applied.
    pub coalesced: u64,
    pub alerts:    u64,
    pub expiries:  u64,
    pub last_at:   Timestamp,
}

#[derive(Clone, Debug)]
pub struct Replay {
    pub policy:         DeliveryPolicy,
    /// Width of one delivery window.  0 delivers each timestamp separately.
    pub window_ms:      u64,
    /// Fire expiries still pending after the last sample.
    pub flush_expiries: bool,
}

impl Default for Replay {
    fn default() -> Self {
        Self { policy: DeliveryPolicy::Queue, window_ms: 0, flush_expiries: true }
    }
}

impl Replay {
    pub fn new(policy: DeliveryPolicy, window_ms: u64) -> Self {
        Self { policy, window_ms, ..Self::default() }
    }

    /// Apply `samples` to `session`, forwarding every outcome to `observer`.
    ///
    /// Samples are applied in timestamp order (stable for ties).  Invalid
    /// location fixes are logged and counted, not fatal.
    pub fn run<O: GuidanceObserver>(
        &self,
        session:  &mut GuidanceSession,
        samples:  impl IntoIterator<Item = SensorSample>,
        observer: &mut O,
    ) -> SensorResult<ReplaySummary> {
        let mut samples: Vec<SensorSample> = samples.into_iter().collect();
        samples.sort_by_key(|s| s.at);

        let mut summary = ReplaySummary { samples: samples.len(), ..ReplaySummary::default() };
        let mut queue = SampleQueue::new(self.policy);
        let mut next = 0;

        while next < samples.len() {
            let window_end = samples[next].at + self.window_ms;
            while next < samples.len() && samples[next].at <= window_end {
                queue.push(samples[next]);
                next += 1;
            }
            while let Some(sample) = queue.pop() {
                fire_due(session, sample.at, observer, &mut summary);
                apply(session, sample, observer, &mut summary)?;
            }
        }
        summary.coalesced = queue.coalesced();

        if self.flush_expiries {
            fire_due(session, Timestamp(u64::MAX), observer, &mut summary);
        }

        info!(
            samples = summary.samples,
            alerts = summary.alerts,
            rejected = summary.rejected,
            coalesced = summary.coalesced,
            "replay finished"
        );
        Ok(summary)
    }
}

/// Fire every expiry due at or before `until`, at its own deadline.
fn fire_due<O: GuidanceObserver>(
    session:  &mut GuidanceSession,
    until:    Timestamp,
    observer: &mut O,
    summary:  &mut ReplaySummary,
) {
    loop {
        match session.next_deadline() {
            Some(due) if due <= until => {
                if let Some(alert) = session.clear_expired_alert(due) {
                    observer.on_alert_cleared(due, &alert);
                    summary.expiries += 1;
                }
            }
            _ => break,
        }
    }
}

fn apply<O: GuidanceObserver>(
    session:  &mut GuidanceSession,
    sample:   SensorSample,
    observer: &mut O,
    summary:  &mut ReplaySummary,
) -> SensorResult<()> {
    summary.last_at = summary.last_at.max(sample.at);
    match sample.reading {
        Reading::Location(loc) => match session.on_location_update(sample.at, loc) {
            Ok(outcome) => {
                summary.locations += 1;
                summary.alerts += outcome.alerts.len() as u64;
                if let Some(expired) = &outcome.expired {
                    debug!(id = %expired.point_id, "expiry fired with location sample");
                    summary.expiries += 1;
                }
                outcome.notify(session, observer);
            }
            Err(GuidanceError::Core(WfError::InvalidCoordinate { lat, lon })) => {
                warn!(at = %sample.at, lat, lon, "rejected location sample");
                summary.rejected += 1;
            }
            Err(e) => return Err(e.into()),
        },
        Reading::Heading(raw) => {
            summary.headings += 1;
            let outcome = session.on_heading_update(sample.at, raw);
            if outcome.expired.is_some() {
                summary.expiries += 1;
            }
            outcome.notify(observer);
        }
    }
    Ok(())
}
