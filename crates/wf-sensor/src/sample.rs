use wf_core::{GeoPoint, RawHeading, Timestamp};

/// What a sensor reported.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reading {
    /// A positioning fix.  Not validated; the session rejects bad fixes.
    Location(GeoPoint),
    Heading(RawHeading),
}

/// One timestamped sensor reading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSample {
    pub at:      Timestamp,
    pub reading: Reading,
}

impl SensorSample {
    pub fn location(at: Timestamp, loc: GeoPoint) -> Self {
        Self { at, reading: Reading::Location(loc) }
    }

    pub fn heading(at: Timestamp, raw: RawHeading) -> Self {
        Self { at, reading: Reading::Heading(raw) }
    }
}
