//! The guidance session: state for one navigation run.
//!
//! A session is created when the user enters navigation with a catalog,
//! receives location and heading samples for its duration, and is discarded
//! (via [`GuidanceSession::end`] or drop) when navigation exits.  The set of
//! announced points and the active alert start empty and are never reset
//! mid-session.
//!
//! # States
//!
//! ```text
//! Idle ──first location──▶ Tracking ──destination set──▶ DestinationLocked
//!   └───────────────destination set, then first location──────────┘
//! ```
//!
//! There is no reverse transition: a destination can be replaced but not
//! cleared, and a location fix is never forgotten.

use std::sync::Arc;

use tracing::{debug, info, trace};

use wf_catalog::{Catalog, PointOfInterest};
use wf_core::{
    distance_m, initial_bearing_deg, normalize_heading, relative_direction_deg, GeoPoint,
    GuidanceConfig, PointId, RawHeading, SessionClock, Timestamp,
};

use crate::alert::format_distance;
use crate::expiry::{ExpiryHandle, ExpiryQueue};
use crate::{Alert, GuidanceError, GuidanceObserver, GuidanceResult, ProximityTracker, Trigger};

// ── Value types ───────────────────────────────────────────────────────────────

/// The fixed target the observer is navigating to.
#[derive(Clone, Debug, PartialEq)]
pub struct Destination {
    pub location: GeoPoint,
    pub name:     Option<String>,
}

impl Destination {
    pub fn new(location: GeoPoint, name: Option<String>) -> Self {
        Self { location, name }
    }
}

impl From<&PointOfInterest> for Destination {
    fn from(poi: &PointOfInterest) -> Self {
        let name = (!poi.display_name.is_empty()).then(|| poi.display_name.clone());
        Self { location: poi.location, name }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuidanceState {
    /// No location fix yet.
    Idle,
    /// Location known, no destination.
    Tracking,
    /// Location and destination both known.
    DestinationLocked,
}

/// Result of one location update.
#[derive(Clone, Debug, Default)]
pub struct LocationOutcome {
    pub at:          Timestamp,
    /// Distance to the destination, if one is set.
    pub distance_m:  Option<f64>,
    /// Bearing to the destination, if one is set.
    pub bearing_deg: Option<f64>,
    /// Points that entered the trigger radius, in catalog order.
    pub triggers:    Vec<Trigger>,
    /// One alert per trigger, same order.  Only the last is still active.
    pub alerts:      Vec<Alert>,
    /// Alert whose expiry fired before this update was applied.
    pub expired:     Option<Alert>,
}

/// Result of one heading update.
#[derive(Clone, Debug, Default)]
pub struct HeadingOutcome {
    pub at:          Timestamp,
    /// The normalized heading, or `None` if the event had no usable reading.
    pub heading_deg: Option<f64>,
    pub expired:     Option<Alert>,
}

/// Read-only snapshot of everything a navigation overlay renders.
#[derive(Clone, Debug, PartialEq)]
pub struct GuidanceView {
    pub state:            GuidanceState,
    pub location:         Option<GeoPoint>,
    pub heading_deg:      Option<f64>,
    pub distance_m:       Option<f64>,
    pub bearing_deg:      Option<f64>,
    pub relative_deg:     Option<f64>,
    pub destination_name: Option<String>,
    pub active_alert:     Option<Alert>,
}

impl GuidanceView {
    /// `"515m"` / `"1.2km"`, or `None` without a destination fix.
    pub fn distance_label(&self) -> Option<String> {
        self.distance_m.map(format_distance)
    }

    /// Whole-degree heading label, `"---"` when unknown.
    pub fn heading_label(&self) -> String {
        degrees_label(self.heading_deg)
    }

    /// Whole-degree bearing label, `"---"` when unknown.
    pub fn bearing_label(&self) -> String {
        degrees_label(self.bearing_deg)
    }
}

fn degrees_label(deg: Option<f64>) -> String {
    match deg {
        Some(d) => format!("{}°", d.round() as i64 % 360),
        None    => "---".to_owned(),
    }
}

/// Totals reported when a session ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub duration_ms:     u64,
    pub announced:       usize,
    pub alerts_raised:   u64,
    pub location_fixes:  u64,
}

// ── GuidanceSession ───────────────────────────────────────────────────────────

/// Stateful orchestrator bound to one navigation attempt.
pub struct GuidanceSession {
    catalog:       Arc<Catalog>,
    config:        GuidanceConfig,
    clock:         SessionClock,

    destination:   Option<Destination>,
    location:      Option<GeoPoint>,
    heading_deg:   Option<f64>,
    distance_m:    Option<f64>,
    bearing_deg:   Option<f64>,

    tracker:       ProximityTracker,
    active_alert:  Option<Alert>,
    alert_expiry:  Option<ExpiryHandle>,
    expiries:      ExpiryQueue<PointId>,

    voice_enabled: bool,
    alerts_raised: u64,
    fixes:         u64,
}

impl GuidanceSession {
    /// Start a session over `catalog`.  Fails if `config` is invalid.
    pub fn new(catalog: Arc<Catalog>, config: GuidanceConfig) -> GuidanceResult<Self> {
        config.validate()?;
        info!(points = catalog.len(), radius_m = config.trigger_radius_m, "guidance session started");
        Ok(Self {
            tracker:       ProximityTracker::new(config.trigger_radius_m),
            voice_enabled: config.voice_enabled,
            catalog,
            config,
            clock:         SessionClock::default(),
            destination:   None,
            location:      None,
            heading_deg:   None,
            distance_m:    None,
            bearing_deg:   None,
            active_alert:  None,
            alert_expiry:  None,
            expiries:      ExpiryQueue::new(),
            alerts_raised: 0,
            fixes:         0,
        })
    }

    // ── Sensor updates ────────────────────────────────────────────────────

    /// Apply a location sample taken at `at`.
    ///
    /// An invalid coordinate is rejected with `InvalidCoordinate` and leaves
    /// the session untouched.
    pub fn on_location_update(&mut self, at: Timestamp, loc: GeoPoint) -> GuidanceResult<LocationOutcome> {
        let loc = loc.validate()?;
        let now = self.clock.advance_to(at);
        let expired = self.clear_expired_alert(now);

        self.location = Some(loc);
        self.fixes += 1;
        self.refresh_destination_metrics()?;

        let triggers = self.tracker.evaluate_catalog(loc, &self.catalog)?;
        let mut alerts = Vec::with_capacity(triggers.len());
        for trigger in &triggers {
            let Some(poi) = self.catalog.get(trigger.poi) else { continue };
            let alert = Alert::for_point(poi, now, self.config.alert_ttl_ms);
            self.set_active_alert(alert.clone());
            alerts.push(alert);
        }

        Ok(LocationOutcome {
            at: now,
            distance_m: self.distance_m,
            bearing_deg: self.bearing_deg,
            triggers,
            alerts,
            expired,
        })
    }

    /// Apply a raw orientation event taken at `at`.
    ///
    /// Events without a usable reading keep the previous heading.
    pub fn on_heading_update(&mut self, at: Timestamp, raw: RawHeading) -> HeadingOutcome {
        let now = self.clock.advance_to(at);
        let expired = self.clear_expired_alert(now);
        let heading_deg = normalize_heading(raw);
        if heading_deg.is_some() {
            self.heading_deg = heading_deg;
        }
        HeadingOutcome { at: now, heading_deg, expired }
    }

    /// Fire the deferred clear of the active alert if it is due at `now`.
    ///
    /// Returns the alert that was cleared, if any.
    pub fn clear_expired_alert(&mut self, now: Timestamp) -> Option<Alert> {
        let now = self.clock.advance_to(now);
        let mut cleared = None;
        for (handle, point_id) in self.expiries.drain_due(now) {
            if self.alert_expiry != Some(handle) {
                continue;
            }
            self.alert_expiry = None;
            if let Some(alert) = self.active_alert.take() {
                trace!(id = %point_id, at = %now, "alert expired");
                cleared = Some(alert);
            }
        }
        cleared
    }

    /// When the active alert's clear is scheduled, if one is pending.
    ///
    /// Hosts arm a timer for this instant and call
    /// [`clear_expired_alert`][Self::clear_expired_alert] when it fires.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.expiries.next_deadline()
    }

    // ── Destination ───────────────────────────────────────────────────────

    /// Set (or replace) the navigation target.
    pub fn set_destination(&mut self, destination: Destination) -> GuidanceResult<()> {
        destination.location.validate()?;
        info!(
            to = %destination.location,
            name = destination.name.as_deref().unwrap_or(""),
            "destination set"
        );
        self.destination = Some(destination);
        self.refresh_destination_metrics()
    }

    pub fn set_destination_to_point(&mut self, poi: &PointOfInterest) -> GuidanceResult<()> {
        self.set_destination(Destination::from(poi))
    }

    /// Navigate to the catalog point with id `id`.
    pub fn set_destination_by_id(&mut self, id: &str) -> GuidanceResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let poi = catalog
            .by_id(id)
            .ok_or_else(|| GuidanceError::UnknownPoint(id.to_owned()))?;
        self.set_destination_to_point(poi)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> GuidanceState {
        match (self.location, &self.destination) {
            (None, _)          => GuidanceState::Idle,
            (Some(_), None)    => GuidanceState::Tracking,
            (Some(_), Some(_)) => GuidanceState::DestinationLocked,
        }
    }

    /// The angle to turn clockwise to face the destination, or `None` if the
    /// bearing or the heading is unknown.
    pub fn relative_direction_deg(&self) -> Option<f64> {
        Some(relative_direction_deg(self.bearing_deg?, self.heading_deg?))
    }

    pub fn current_location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn current_heading_deg(&self) -> Option<f64> {
        self.heading_deg
    }

    pub fn distance_to_destination_m(&self) -> Option<f64> {
        self.distance_m
    }

    pub fn bearing_to_destination_deg(&self) -> Option<f64> {
        self.bearing_deg
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn active_alert(&self) -> Option<&Alert> {
        self.active_alert.as_ref()
    }

    pub fn is_announced(&self, id: &str) -> bool {
        self.tracker.is_announced(id)
    }

    pub fn announced_ids(&self) -> impl Iterator<Item = &PointId> + '_ {
        self.tracker.announced()
    }

    pub fn announced_count(&self) -> usize {
        self.tracker.announced_count()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) {
        debug!(enabled, "voice guidance toggled");
        self.voice_enabled = enabled;
    }

    pub fn view(&self) -> GuidanceView {
        GuidanceView {
            state:            self.state(),
            location:         self.location,
            heading_deg:      self.heading_deg,
            distance_m:       self.distance_m,
            bearing_deg:      self.bearing_deg,
            relative_deg:     self.relative_direction_deg(),
            destination_name: self.destination.as_ref().and_then(|d| d.name.clone()),
            active_alert:     self.active_alert.clone(),
        }
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// End the session, cancelling any pending alert clear.
    pub fn end(mut self) -> SessionSummary {
        if let Some(handle) = self.alert_expiry.take() {
            self.expiries.cancel(handle);
        }
        self.expiries.clear();

        let summary = SessionSummary {
            duration_ms:    self.clock.now.0,
            announced:      self.tracker.announced_count(),
            alerts_raised:  self.alerts_raised,
            location_fixes: self.fixes,
        };
        info!(
            duration = %self.clock,
            announced = summary.announced,
            alerts = summary.alerts_raised,
            "guidance session ended"
        );
        summary
    }

    /// End the session and report the summary to `observer`.
    pub fn end_with<O: GuidanceObserver>(self, observer: &mut O) -> SessionSummary {
        let summary = self.end();
        observer.on_session_end(&summary);
        summary
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn refresh_destination_metrics(&mut self) -> GuidanceResult<()> {
        let (Some(loc), Some(dest)) = (self.location, &self.destination) else {
            return Ok(());
        };
        self.distance_m = Some(distance_m(loc, dest.location)?);
        self.bearing_deg = Some(initial_bearing_deg(loc, dest.location)?);
        Ok(())
    }

    /// Make `alert` the active one, replacing any pending clear.
    fn set_active_alert(&mut self, alert: Alert) {
        if let Some(previous) = self.alert_expiry.take() {
            self.expiries.cancel(previous);
        }
        self.alert_expiry = Some(self.expiries.schedule(alert.expires_at, alert.point_id.clone()));
        info!(id = %alert.point_id, category = %alert.category, text = %alert.message, "alert raised");
        self.active_alert = Some(alert);
        self.alerts_raised += 1;
    }
}

impl std::fmt::Debug for GuidanceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidanceSession")
            .field("state", &self.state())
            .field("now", &self.clock.now)
            .field("announced", &self.tracker.announced_count())
            .field("active_alert", &self.active_alert.as_ref().map(|a| &a.point_id))
            .finish()
    }
}

// ── Observer dispatch ─────────────────────────────────────────────────────────

impl LocationOutcome {
    /// Forward this outcome to `observer`, in the order things happened:
    /// expiry, position, triggers, alerts.
    pub fn notify<O: GuidanceObserver>(&self, session: &GuidanceSession, observer: &mut O) {
        if let Some(expired) = &self.expired {
            observer.on_alert_cleared(self.at, expired);
        }
        observer.on_location(self.at, &session.view());
        for trigger in &self.triggers {
            if let Some(poi) = session.catalog().get(trigger.poi) {
                observer.on_trigger(self.at, poi, trigger.distance_m);
            }
        }
        for alert in &self.alerts {
            observer.on_alert(alert, session.voice_enabled());
        }
    }
}

impl HeadingOutcome {
    pub fn notify<O: GuidanceObserver>(&self, observer: &mut O) {
        if let Some(expired) = &self.expired {
            observer.on_alert_cleared(self.at, expired);
        }
        if let Some(h) = self.heading_deg {
            observer.on_heading(self.at, h);
        }
    }
}
