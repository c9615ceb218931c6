//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `guidance.db` file in the configured output directory
//! with two tables: `alerts` and `positions`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AlertRow, OutputResult, PositionRow};

/// Writes guidance output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `guidance.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("guidance.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS alerts (
                 at_ms    INTEGER NOT NULL,
                 point_id TEXT    NOT NULL,
                 category TEXT    NOT NULL,
                 message  TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS positions (
                 at_ms       INTEGER NOT NULL,
                 lat         REAL    NOT NULL,
                 lon         REAL    NOT NULL,
                 distance_m  REAL,
                 bearing_deg REAL,
                 heading_deg REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_alert(&mut self, row: &AlertRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO alerts (at_ms, point_id, category, message) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.at_ms as i64, row.point_id, row.category, row.message],
        )?;
        Ok(())
    }

    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO positions \
                 (at_ms, lat, lon, distance_m, bearing_deg, heading_deg) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.at_ms as i64,
                    row.lat,
                    row.lon,
                    row.distance_m,
                    row.bearing_deg,
                    row.heading_deg,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
