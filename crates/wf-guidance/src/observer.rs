//! Guidance observer trait for presentation and data collection.

use wf_catalog::PointOfInterest;
use wf_core::Timestamp;

use crate::{Alert, GuidanceView, SessionSummary};

/// Callbacks fed from session outcomes via `LocationOutcome::notify` and
/// `HeadingOutcome::notify`.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: overlay printer
///
/// ```rust,ignore
/// struct Overlay;
///
/// impl GuidanceObserver for Overlay {
///     fn on_location(&mut self, at: Timestamp, view: &GuidanceView) {
///         println!("{at}: {}", view.distance_label().unwrap_or_default());
///     }
/// }
/// ```
pub trait GuidanceObserver {
    /// Called after every accepted location sample.
    fn on_location(&mut self, _at: Timestamp, _view: &GuidanceView) {}

    /// Called when a heading sample produced a usable heading.
    fn on_heading(&mut self, _at: Timestamp, _heading_deg: f64) {}

    /// Called once per point that entered the trigger radius.
    fn on_trigger(&mut self, _at: Timestamp, _poi: &PointOfInterest, _distance_m: f64) {}

    /// Called for every alert raised.  `voice_enabled` is the session's
    /// voice toggle at the time the alert was raised.
    fn on_alert(&mut self, _alert: &Alert, _voice_enabled: bool) {}

    /// Called when the active alert's deferred clear fires.
    fn on_alert_cleared(&mut self, _at: Timestamp, _alert: &Alert) {}

    /// Called once when the session ends.
    fn on_session_end(&mut self, _summary: &SessionSummary) {}
}

/// A [`GuidanceObserver`] that does nothing.
pub struct NoopObserver;

impl GuidanceObserver for NoopObserver {}

impl<T: GuidanceObserver + ?Sized> GuidanceObserver for &mut T {
    fn on_location(&mut self, at: Timestamp, view: &GuidanceView) {
        (**self).on_location(at, view)
    }
    fn on_heading(&mut self, at: Timestamp, heading_deg: f64) {
        (**self).on_heading(at, heading_deg)
    }
    fn on_trigger(&mut self, at: Timestamp, poi: &PointOfInterest, distance_m: f64) {
        (**self).on_trigger(at, poi, distance_m)
    }
    fn on_alert(&mut self, alert: &Alert, voice_enabled: bool) {
        (**self).on_alert(alert, voice_enabled)
    }
    fn on_alert_cleared(&mut self, at: Timestamp, alert: &Alert) {
        (**self).on_alert_cleared(at, alert)
    }
    fn on_session_end(&mut self, summary: &SessionSummary) {
        (**self).on_session_end(summary)
    }
}

/// Fan out to two observers, first `A` then `B`.
impl<A: GuidanceObserver, B: GuidanceObserver> GuidanceObserver for (A, B) {
    fn on_location(&mut self, at: Timestamp, view: &GuidanceView) {
        self.0.on_location(at, view);
        self.1.on_location(at, view);
    }
    fn on_heading(&mut self, at: Timestamp, heading_deg: f64) {
        self.0.on_heading(at, heading_deg);
        self.1.on_heading(at, heading_deg);
    }
    fn on_trigger(&mut self, at: Timestamp, poi: &PointOfInterest, distance_m: f64) {
        self.0.on_trigger(at, poi, distance_m);
        self.1.on_trigger(at, poi, distance_m);
    }
    fn on_alert(&mut self, alert: &Alert, voice_enabled: bool) {
        self.0.on_alert(alert, voice_enabled);
        self.1.on_alert(alert, voice_enabled);
    }
    fn on_alert_cleared(&mut self, at: Timestamp, alert: &Alert) {
        self.0.on_alert_cleared(at, alert);
        self.1.on_alert_cleared(at, alert);
    }
    fn on_session_end(&mut self, summary: &SessionSummary) {
        self.0.on_session_end(summary);
        self.1.on_session_end(summary);
    }
}
