//! `SharedSession`: a session shared between sensor callbacks.
//!
//! Location and orientation events may be delivered on different threads.
//! Each update takes the lock for its whole duration, so the tracker's
//! check-then-announce step and the alert/expiry swap are atomic with respect
//! to other updates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wf_core::{GeoPoint, RawHeading, Timestamp};

use crate::{
    Alert, Destination, GuidanceResult, GuidanceSession, GuidanceView, HeadingOutcome,
    LocationOutcome,
};

/// Cloneable handle to one [`GuidanceSession`].
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<GuidanceSession>>,
}

impl SharedSession {
    pub fn new(session: GuidanceSession) -> Self {
        Self { inner: Arc::new(Mutex::new(session)) }
    }

    /// Poisoning is ignored: updates validate before they mutate.
    fn lock(&self) -> MutexGuard<'_, GuidanceSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut GuidanceSession) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn on_location_update(&self, at: Timestamp, loc: GeoPoint) -> GuidanceResult<LocationOutcome> {
        self.lock().on_location_update(at, loc)
    }

    pub fn on_heading_update(&self, at: Timestamp, raw: RawHeading) -> HeadingOutcome {
        self.lock().on_heading_update(at, raw)
    }

    pub fn clear_expired_alert(&self, now: Timestamp) -> Option<Alert> {
        self.lock().clear_expired_alert(now)
    }

    pub fn set_destination(&self, destination: Destination) -> GuidanceResult<()> {
        self.lock().set_destination(destination)
    }

    pub fn set_voice_enabled(&self, enabled: bool) {
        self.lock().set_voice_enabled(enabled)
    }

    pub fn view(&self) -> GuidanceView {
        self.lock().view()
    }

    /// Recover the session if this is the last handle.
    pub fn into_inner(self) -> Result<GuidanceSession, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}
