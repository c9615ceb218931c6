//! Alert construction and display helpers.

use wf_catalog::{Category, PointOfInterest};
use wf_core::{PointId, Timestamp};

/// Name used in messages when a point has no display name.
const FALLBACK_NAME: &str = "this location";

/// A proximity alert raised for one point of interest.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub point_id:     PointId,
    pub category:     Category,
    pub display_name: String,
    pub message:      String,
    /// When the alert became active.
    pub set_at:       Timestamp,
    /// When the alert's deferred clear is scheduled to fire.
    pub expires_at:   Timestamp,
}

impl Alert {
    /// Build the alert for `poi`, active from `now` for `ttl_ms`.
    pub fn for_point(poi: &PointOfInterest, now: Timestamp, ttl_ms: u64) -> Self {
        Self {
            point_id:     poi.id.clone(),
            category:     poi.category.clone(),
            display_name: poi.display_name.clone(),
            message:      guidance_message(&poi.category, &poi.display_name),
            set_at:       now,
            expires_at:   now + ttl_ms,
        }
    }
}

/// The spoken/displayed message for a feature of `category` at `name`.
///
/// An empty `name` reads as "this location".
pub fn guidance_message(category: &Category, name: &str) -> String {
    let name = match name.trim() {
        "" => FALLBACK_NAME,
        n  => n,
    };
    match category {
        Category::Ramp     => format!("Wheelchair ramp ahead at {name}."),
        Category::Tactile  => "Tactile paving starts ahead.".to_owned(),
        Category::Elevator => format!("Elevator access available at {name}."),
        Category::Bathroom => "Accessible restroom nearby.".to_owned(),
        Category::Parking  => format!("Disabled parking area at {name}."),
        Category::Braille  => "Braille signage available.".to_owned(),
        Category::Audio    => "Audio guidance beacon active.".to_owned(),
        Category::Stairs   => "Caution: steep stairs ahead.".to_owned(),
        Category::Obstacle => "Caution: obstacle on your path.".to_owned(),
        Category::Other(kind) => format!("Accessibility feature: {kind} at {name}."),
    }
}

/// Distance label as shown on the navigation overlay: whole metres up to
/// 1 km, then kilometres with one decimal.
pub fn format_distance(distance_m: f64) -> String {
    let d = distance_m.round();
    if d > 1_000.0 {
        format!("{:.1}km", d / 1_000.0)
    } else {
        format!("{}m", d as i64)
    }
}
