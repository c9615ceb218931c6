//! CSV trace loader.
//!
//! # CSV format
//!
//! One row per sensor sample, in delivery order.  Columns that do not apply
//! to a row's `kind` are left empty.
//!
//! ```csv
//! at_ms,kind,lat,lon,compass_heading,alpha
//! 0,location,13.0827,80.2707,,
//! 120,heading,,,45.0,
//! 250,heading,,,,315.0
//! 1000,location,13.0829,80.2708,,
//! ```
//!
//! | `kind`     | Required columns | Result                          |
//! |------------|------------------|---------------------------------|
//! | `location` | `lat`, `lon`     | `Reading::Location`             |
//! | `heading`  | none             | `Reading::Heading` (both fields optional) |
//!
//! Coordinates are not range-checked here.  A recorded trace may contain bad
//! fixes and the session is the component that rejects them.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use wf_core::{GeoPoint, RawHeading, Timestamp};

use crate::{SensorError, SensorResult, SensorSample};

#[derive(Deserialize)]
struct TraceRecord {
    at_ms:           u64,
    kind:            String,
    lat:             Option<f64>,
    lon:             Option<f64>,
    compass_heading: Option<f64>,
    alpha:           Option<f64>,
}

/// Load a sensor trace from a CSV file.
pub fn load_trace_csv(path: &Path) -> SensorResult<Vec<SensorSample>> {
    let file = std::fs::File::open(path)?;
    load_trace_reader(file)
}

/// Like [`load_trace_csv`] but accepts any `Read` source.
pub fn load_trace_reader<R: Read>(reader: R) -> SensorResult<Vec<SensorSample>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut samples = Vec::new();

    for (row, result) in csv_reader.deserialize::<TraceRecord>().enumerate() {
        let rec = result?;
        samples.push(to_sample(row, rec)?);
    }

    debug!(samples = samples.len(), "loaded sensor trace");
    Ok(samples)
}

fn to_sample(row: usize, rec: TraceRecord) -> SensorResult<SensorSample> {
    let at = Timestamp(rec.at_ms);
    match rec.kind.to_ascii_lowercase().as_str() {
        "location" => match (rec.lat, rec.lon) {
            (Some(lat), Some(lon)) => Ok(SensorSample::location(at, GeoPoint { lat, lon })),
            _ => Err(SensorError::InvalidRow {
                row,
                reason: "location row needs both lat and lon".into(),
            }),
        },
        "heading" => Ok(SensorSample::heading(
            at,
            RawHeading { compass_heading: rec.compass_heading, alpha: rec.alpha },
        )),
        other => Err(SensorError::InvalidRow {
            row,
            reason: format!("unknown kind {other:?}: expected \"location\" or \"heading\""),
        }),
    }
}
