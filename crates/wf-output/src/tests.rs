//! Integration tests for wf-output.

#[cfg(test)]
mod helpers {
    use crate::{AlertRow, PositionRow};

    pub fn alert_row(at_ms: u64, id: &str) -> AlertRow {
        AlertRow {
            at_ms,
            point_id: id.to_owned(),
            category: "ramp".to_owned(),
            message:  "Wheelchair ramp ahead at Gate 3, north side.".to_owned(),
        }
    }

    pub fn position_row(at_ms: u64, distance_m: Option<f64>) -> PositionRow {
        PositionRow {
            at_ms,
            lat: 13.0827,
            lon: 80.2707,
            distance_m,
            bearing_deg: distance_m.map(|_| 45.0),
            heading_deg: None,
        }
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::helpers::{alert_row, position_row};
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("alerts.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["at_ms", "point_id", "category", "message"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("positions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["at_ms", "lat", "lon", "distance_m", "bearing_deg", "heading_deg"]);
    }

    #[test]
    fn csv_alert_message_with_comma_survives() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_alert(&alert_row(1_500, "p1")).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("alerts.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "1500");
        assert_eq!(&rows[0][1], "p1");
        assert_eq!(&rows[0][3], "Wheelchair ramp ahead at Gate 3, north side.");
    }

    #[test]
    fn csv_unknown_values_are_empty() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_positions(&[position_row(0, None), position_row(1_000, Some(12.5))]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("positions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][5], "");
        assert_eq!(&rows[1][3], "12.5");
        assert_eq!(&rows[1][4], "45");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does-not-exist")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use wf_catalog::{Catalog, Category, PointOfInterest};
    use wf_core::{GeoPoint, GuidanceConfig, Timestamp};
    use wf_guidance::{Destination, GuidanceSession};

    use crate::{CsvWriter, GuidanceOutputObserver};

    const ORIGIN: GeoPoint = GeoPoint { lat: 13.0827, lon: 80.2707 };

    #[test]
    fn session_output_end_to_end() {
        let dir: TempDir = tempfile::tempdir().expect("create temp dir");
        let target = ORIGIN.destination(90.0, 300.0).unwrap();
        let catalog = Catalog::from_points(vec![
            PointOfInterest::new("lift", ORIGIN.destination(0.0, 10.0).unwrap(), Category::Elevator, "Lobby"),
            PointOfInterest::new("dest", target, Category::Parking, "Lot B"),
        ])
        .unwrap();
        let mut session = GuidanceSession::new(Arc::new(catalog), GuidanceConfig::default()).unwrap();
        session.set_destination(Destination::new(target, None)).unwrap();

        let mut obs = GuidanceOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        for (t, loc) in [(0, ORIGIN), (1_000, ORIGIN.destination(90.0, 5.0).unwrap())] {
            session.on_location_update(Timestamp(t), loc).unwrap().notify(&session, &mut obs);
        }
        session.end_with(&mut obs);
        assert!(obs.take_error().is_none());
        assert_eq!(obs.alerts_written(), 1);

        let mut rdr = csv::Reader::from_path(dir.path().join("alerts.csv")).unwrap();
        let alerts: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(alerts.len(), 1);
        assert_eq!(&alerts[0][1], "lift");
        assert_eq!(&alerts[0][2], "elevator");
        assert_eq!(&alerts[0][3], "Elevator access available at Lobby.");

        let mut rdr = csv::Reader::from_path(dir.path().join("positions.csv")).unwrap();
        let positions: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(positions.len(), 2);
        let d: f64 = positions[1][3].parse().unwrap();
        assert!((d - 295.0).abs() < 0.5, "d = {d}");
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::helpers::{alert_row, position_row};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("guidance.db").exists());
    }

    #[test]
    fn sqlite_alert_and_positions() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_alert(&alert_row(2_000, "p7")).unwrap();
        w.write_positions(&[position_row(0, None), position_row(1_000, Some(3.0))]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("guidance.db")).unwrap();
        let id: String = conn
            .query_row("SELECT point_id FROM alerts WHERE at_ms = 2000", [], |r| r.get(0))
            .unwrap();
        assert_eq!(id, "p7");

        let nulls: i64 = conn
            .query_row("SELECT COUNT(*) FROM positions WHERE distance_m IS NULL", [], |r| r.get(0))
            .unwrap();
        assert_eq!(nulls, 1);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
