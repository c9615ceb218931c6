//! `wf-output`: guidance output writers.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                     |
//! |-----------|---------|-----------------------------------|
//! | *(none)*  | CSV     | `alerts.csv`, `positions.csv`     |
//! | `sqlite`  | SQLite  | `guidance.db`                     |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`GuidanceOutputObserver`], which implements
//! `wf_guidance::GuidanceObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wf_output::{CsvWriter, GuidanceOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = GuidanceOutputObserver::new(writer);
//! Replay::default().run(&mut session, samples, &mut obs).unwrap();
//! session.end_with(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::GuidanceOutputObserver;
pub use row::{AlertRow, PositionRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
