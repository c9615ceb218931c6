//! Orientation normalizer.
//!
//! Platforms report device orientation in one of two conventions:
//!
//! | Field                  | Convention                                    |
//! |------------------------|-----------------------------------------------|
//! | `webkitCompassHeading` | clockwise from true north (used as-is)        |
//! | `alpha`                | counter-clockwise from the device's start pose; converted with `(360 - alpha) mod 360` |
//!
//! [`normalize_heading`] reconciles both into a single clockwise-from-north
//! value in `[0, 360)`, or `None` when no usable reading is present.  It never
//! fails: malformed input degrades to `None`.

use crate::geo::wrap_degrees;

/// A raw orientation event as delivered by the platform.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawHeading {
    #[cfg_attr(feature = "serde", serde(default, rename = "webkitCompassHeading"))]
    pub compass_heading: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alpha: Option<f64>,
}

impl RawHeading {
    /// A clockwise-from-north compass reading.
    #[inline]
    pub fn compass(deg: f64) -> Self {
        Self { compass_heading: Some(deg), alpha: None }
    }

    /// A counter-clockwise `alpha` reading.
    #[inline]
    pub fn alpha(deg: f64) -> Self {
        Self { compass_heading: None, alpha: Some(deg) }
    }

    /// Convenience for `normalize_heading(self)`.
    #[inline]
    pub fn normalize(self) -> Option<f64> {
        normalize_heading(self)
    }
}

/// Normalize a raw orientation event to degrees clockwise from true north.
///
/// A finite compass reading takes precedence; otherwise a finite `alpha` is
/// converted.  Feeding an already-normalized compass heading through returns
/// it unchanged.
pub fn normalize_heading(raw: RawHeading) -> Option<f64> {
    if let Some(deg) = raw.compass_heading.filter(|d| d.is_finite()) {
        return Some(wrap_degrees(deg));
    }
    raw.alpha
        .filter(|a| a.is_finite())
        .map(|a| wrap_degrees(360.0 - a))
}

/// The angle the observer must turn (clockwise) to face `bearing_deg` while
/// currently facing `heading_deg`, in `[0, 360)`.
#[inline]
pub fn relative_direction_deg(bearing_deg: f64, heading_deg: f64) -> f64 {
    wrap_degrees(bearing_deg - heading_deg)
}
