//! Plain data row types written by output backends.

/// One alert raised during a session.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRow {
    /// Session time the alert was raised, milliseconds.
    pub at_ms:    u64,
    pub point_id: String,
    pub category: String,
    pub message:  String,
}

/// The observer's state after one accepted location sample.
///
/// Optional fields are empty (CSV) or NULL (SQLite) when unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    pub at_ms:       u64,
    pub lat:         f64,
    pub lon:         f64,
    /// Distance to the destination.
    pub distance_m:  Option<f64>,
    pub bearing_deg: Option<f64>,
    pub heading_deg: Option<f64>,
}
