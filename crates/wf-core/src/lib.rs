//! `wf-core`: foundational types for the `wayfinder` guidance engine.
//!
//! This crate is a dependency of every other `wf-*` crate.  It has no `wf-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `PointId` (catalog string id), `PoiIndex` (catalog slot)  |
//! | [`geo`]       | `GeoPoint`, haversine distance, initial bearing           |
//! | [`heading`]   | `RawHeading`, orientation normalizer, relative direction  |
//! | [`time`]      | `Timestamp`, `SessionClock`                               |
//! | [`config`]    | `GuidanceConfig`                                          |
//! | [`error`]     | `WfError`, `WfResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod heading;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::GuidanceConfig;
pub use error::{WfError, WfResult};
pub use geo::{distance_m, initial_bearing_deg, GeoPoint, EARTH_RADIUS_M};
pub use heading::{normalize_heading, relative_direction_deg, RawHeading};
pub use ids::{PoiIndex, PointId};
pub use time::{SessionClock, Timestamp};
