//! Guidance configuration.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! `GuidanceSession::new`.  Every field has a default that reproduces the
//! behaviour of the AR navigation screen.

use crate::{WfError, WfResult};

/// Tunables for one guidance session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GuidanceConfig {
    /// A point triggers when the observer is at most this many metres away.
    pub trigger_radius_m: f64,

    /// How long an alert stays active before it is cleared, in milliseconds.
    pub alert_ttl_ms: u64,

    /// Initial state of the voice toggle.
    pub voice_enabled: bool,

    /// Speech rate handed to the text-to-speech collaborator (1.0 = normal).
    pub speech_rate: f32,
}

impl GuidanceConfig {
    pub const DEFAULT_TRIGGER_RADIUS_M: f64 = 20.0;
    pub const DEFAULT_ALERT_TTL_MS: u64 = 5_000;
    pub const DEFAULT_SPEECH_RATE: f32 = 0.9;

    /// Reject configurations that would make the session misbehave.
    pub fn validate(&self) -> WfResult<()> {
        if !self.trigger_radius_m.is_finite() || self.trigger_radius_m < 0.0 {
            return Err(WfError::Config(format!(
                "trigger_radius_m must be a finite non-negative distance, got {}",
                self.trigger_radius_m
            )));
        }
        if self.alert_ttl_ms == 0 {
            return Err(WfError::Config("alert_ttl_ms must be positive".into()));
        }
        if !self.speech_rate.is_finite() || self.speech_rate <= 0.0 {
            return Err(WfError::Config(format!(
                "speech_rate must be positive, got {}",
                self.speech_rate
            )));
        }
        Ok(())
    }
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            trigger_radius_m: Self::DEFAULT_TRIGGER_RADIUS_M,
            alert_ttl_ms:     Self::DEFAULT_ALERT_TTL_MS,
            voice_enabled:    true,
            speech_rate:      Self::DEFAULT_SPEECH_RATE,
        }
    }
}
