//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `alerts.csv`
//! - `positions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AlertRow, OutputResult, PositionRow};

/// Writes guidance output to two CSV files.
pub struct CsvWriter {
    alerts:    Writer<File>,
    positions: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut alerts = Writer::from_path(dir.join("alerts.csv"))?;
        alerts.write_record(["at_ms", "point_id", "category", "message"])?;

        let mut positions = Writer::from_path(dir.join("positions.csv"))?;
        positions.write_record(["at_ms", "lat", "lon", "distance_m", "bearing_deg", "heading_deg"])?;

        Ok(Self { alerts, positions, finished: false })
    }
}

fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_alert(&mut self, row: &AlertRow) -> OutputResult<()> {
        let at_ms = row.at_ms.to_string();
        self.alerts.write_record([
            at_ms.as_str(),
            row.point_id.as_str(),
            row.category.as_str(),
            row.message.as_str(),
        ])?;
        Ok(())
    }

    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.at_ms.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                opt(row.distance_m),
                opt(row.bearing_deg),
                opt(row.heading_deg),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.alerts.flush()?;
        self.positions.flush()?;
        Ok(())
    }
}
