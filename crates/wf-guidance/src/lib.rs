//! `wf-guidance`: the geospatial guidance engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`tracker`]  | `ProximityTracker`: once-per-session proximity triggers        |
//! | [`alert`]    | `Alert`, category message templates, distance labels            |
//! | [`expiry`]   | `ExpiryQueue`, `ExpiryHandle`: cancellable deferred actions    |
//! | [`session`]  | `GuidanceSession`: the stateful orchestrator                   |
//! | [`observer`] | `GuidanceObserver` trait, `NoopObserver`                        |
//! | [`speech`]   | `SpeechSink`, `SpeechObserver`: text-to-speech bridge          |
//! | [`shared`]   | `SharedSession`: mutex-guarded session for multi-threaded hosts |
//! | [`error`]    | `GuidanceError`, `GuidanceResult<T>`                            |
//!
//! # Update model
//!
//! ```text
//! on_location_update(at, loc)
//!   ① fire alert expiries due at `at`
//!   ② store location; recompute distance/bearing to the destination
//!   ③ tracker: points newly within the trigger radius (catalog order)
//!   ④ one alert per trigger; the last one stays active, its expiry is
//!      scheduled and the previous expiry is cancelled
//! ```
//!
//! Session methods return outcome values; hosts forward them to a
//! [`GuidanceObserver`] with the outcome's `notify` method.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                             |
//! |-----------|----------------------------------------------------|
//! | `fx-hash` | FxHash for the announced-point set.                |

pub mod alert;
pub mod error;
pub mod expiry;
pub mod observer;
pub mod session;
pub mod shared;
pub mod speech;
pub mod tracker;


pub use alert::{format_distance, guidance_message, Alert};
pub use error::{GuidanceError, GuidanceResult};
pub use expiry::{ExpiryHandle, ExpiryQueue};
pub use observer::{GuidanceObserver, NoopObserver};
pub use session::{
    Destination, GuidanceSession, GuidanceState, GuidanceView, HeadingOutcome, LocationOutcome,
    SessionSummary,
};
pub use shared::SharedSession;
pub use speech::{SpeechObserver, SpeechSink, TracingSpeech, Utterance};
pub use tracker::{ProximityTracker, Trigger};
