//! `wf-sensor`: sensor sample streams and session replay.
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`sample`]    | `SensorSample`, `Reading`                                  |
//! | [`loader`]    | CSV trace loader                                           |
//! | [`synthetic`] | `SyntheticWalk`: seeded noisy walk between two points     |
//! | [`rng`]       | `SensorRng`: deterministic RNG for synthetic traces       |
//! | [`queue`]     | `SampleQueue`, `DeliveryPolicy`: pending-sample handling  |
//! | [`replay`]    | `Replay`: drives a `GuidanceSession` from a sample stream |
//! | [`error`]     | `SensorError`, `SensorResult<T>`                           |

pub mod error;
pub mod loader;
pub mod queue;
pub mod replay;
pub mod rng;
pub mod sample;
pub mod synthetic;

#[cfg(test)]
mod tests;

pub use error::{SensorError, SensorResult};
pub use loader::{load_trace_csv, load_trace_reader};
pub use queue::{DeliveryPolicy, SampleQueue};
pub use replay::{Replay, ReplaySummary};
pub use rng::SensorRng;
pub use sample::{Reading, SensorSample};
pub use synthetic::SyntheticWalk;
