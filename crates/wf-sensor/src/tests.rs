//! Unit tests for wf-sensor.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use wf_catalog::{Catalog, Category, PointOfInterest};
    use wf_core::{GeoPoint, GuidanceConfig};
    use wf_guidance::GuidanceSession;

    pub const ORIGIN: GeoPoint = GeoPoint { lat: 13.0827, lon: 80.2707 };

    pub fn north(m: f64) -> GeoPoint {
        ORIGIN.destination(0.0, m).unwrap()
    }

    pub fn session_with(points: Vec<(&str, GeoPoint)>) -> GuidanceSession {
        let points = points
            .into_iter()
            .map(|(id, loc)| PointOfInterest::new(id, loc, Category::Ramp, id))
            .collect();
        let catalog = Catalog::from_points(points).unwrap();
        GuidanceSession::new(Arc::new(catalog), GuidanceConfig::default()).unwrap()
    }
}

// ── Trace loader ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use wf_core::{GeoPoint, Timestamp};

    use crate::{load_trace_reader, Reading, SensorError};

    const TRACE: &str = "\
at_ms,kind,lat,lon,compass_heading,alpha
0,location,13.0827,80.2707,,
120,heading,,,45.0,
250,HEADING,,,,315.0
300,heading,,,,
1000,location,13.0829, 80.2708,,
";

    #[test]
    fn parses_all_kinds() {
        let samples = load_trace_reader(Cursor::new(TRACE)).unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].reading, Reading::Location(GeoPoint { lat: 13.0827, lon: 80.2707 }));
        assert_eq!(samples[4].at, Timestamp(1_000));

        let Reading::Heading(h) = samples[1].reading else { panic!("expected heading") };
        assert_eq!(h.normalize(), Some(45.0));
        let Reading::Heading(h) = samples[2].reading else { panic!("expected heading") };
        assert_eq!(h.normalize(), Some(45.0));
        let Reading::Heading(h) = samples[3].reading else { panic!("expected heading") };
        assert_eq!(h.normalize(), None);
    }

    #[test]
    fn location_without_coordinates_is_an_error() {
        let csv = "at_ms,kind,lat,lon,compass_heading,alpha\n0,location,13.0,,,\n";
        let err = load_trace_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, SensorError::InvalidRow { row: 0, .. }));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let csv = "at_ms,kind,lat,lon,compass_heading,alpha\n0,gyro,,,,\n";
        assert!(matches!(
            load_trace_reader(Cursor::new(csv)).unwrap_err(),
            SensorError::InvalidRow { .. }
        ));
    }

    #[test]
    fn out_of_range_fix_is_kept_for_the_session_to_reject() {
        let csv = "at_ms,kind,lat,lon,compass_heading,alpha\n0,location,95.0,0.0,,\n";
        let samples = load_trace_reader(Cursor::new(csv)).unwrap();
        assert_eq!(samples[0].reading, Reading::Location(GeoPoint { lat: 95.0, lon: 0.0 }));
    }
}

// ── SampleQueue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use wf_core::{RawHeading, Timestamp};

    use super::helpers::{north, ORIGIN};
    use crate::{DeliveryPolicy, SampleQueue, SensorSample};

    #[test]
    fn queue_keeps_everything_in_order() {
        let mut q = SampleQueue::new(DeliveryPolicy::Queue);
        q.push(SensorSample::location(Timestamp(0), ORIGIN));
        q.push(SensorSample::location(Timestamp(1), north(5.0)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop().unwrap().at, Timestamp(0));
        assert_eq!(q.pop().unwrap().at, Timestamp(1));
        assert_eq!(q.coalesced(), 0);
    }

    #[test]
    fn coalesce_keeps_newest_of_each_kind() {
        let mut q = SampleQueue::new(DeliveryPolicy::Coalesce);
        q.push(SensorSample::location(Timestamp(0), ORIGIN));
        q.push(SensorSample::heading(Timestamp(1), RawHeading::compass(10.0)));
        q.push(SensorSample::location(Timestamp(2), north(5.0)));
        q.push(SensorSample::heading(Timestamp(3), RawHeading::compass(20.0)));

        assert_eq!(q.len(), 2);
        assert_eq!(q.coalesced(), 2);
        let first = q.pop().unwrap();
        assert_eq!(first, SensorSample::location(Timestamp(2), north(5.0)));
        assert_eq!(q.pop().unwrap().at, Timestamp(3));
        assert!(q.is_empty());
    }
}

// ── SyntheticWalk ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod synthetic {
    use wf_core::{distance_m, GeoPoint, Timestamp, WfError};

    use super::helpers::{north, ORIGIN};
    use crate::{Reading, SensorError, SyntheticWalk};

    #[test]
    fn same_seed_same_trace() {
        let a = SyntheticWalk::new(ORIGIN, north(50.0), 7).generate().unwrap();
        let b = SyntheticWalk::new(ORIGIN, north(50.0), 7).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn noiseless_walk_ends_at_target() {
        let target = north(14.0);
        let walk = SyntheticWalk::new(ORIGIN, target, 1)
            .with_jitter_m(0.0)
            .with_heading_noise_deg(0.0);
        let samples = walk.generate().unwrap();

        let fixes: Vec<_> = samples
            .iter()
            .filter_map(|s| match s.reading {
                Reading::Location(p) => Some((s.at, p)),
                Reading::Heading(_) => None,
            })
            .collect();
        // 14 m at 1.4 m/s, one fix per second: t = 0..=10 s.
        assert_eq!(fixes.len(), 11);
        assert_eq!(fixes[0].1, ORIGIN);
        assert_eq!(fixes.last().unwrap(), &(Timestamp(10_000), target));

        for s in &samples {
            if let Reading::Heading(h) = s.reading {
                let deg = h.normalize().unwrap();
                assert!(deg < 0.01 || deg > 359.99, "deg = {deg}");
            }
        }
    }

    #[test]
    fn jitter_is_bounded() {
        let walk = SyntheticWalk::new(ORIGIN, ORIGIN, 3).with_jitter_m(4.0);
        let samples = walk.generate().unwrap();
        assert_eq!(samples.len(), 1);
        let Reading::Location(p) = samples[0].reading else { panic!("expected location") };
        assert!(distance_m(ORIGIN, p).unwrap() <= 4.0 + 1e-6);
    }

    #[test]
    fn zero_speed_is_rejected() {
        let mut walk = SyntheticWalk::new(ORIGIN, north(10.0), 0);
        walk.speed_mps = 0.0;
        assert!(matches!(walk.generate().unwrap_err(), SensorError::Core(_)));
    }

    #[test]
    fn overlong_walk_is_rejected() {
        // Roughly antipodal to ORIGIN: about 20,000 km at 1.4 m/s.
        let far = GeoPoint { lat: -13.0827, lon: -99.7293 };
        let err = SyntheticWalk::new(ORIGIN, far, 0).generate().unwrap_err();
        assert!(matches!(err, SensorError::Core(WfError::Config(_))), "{err:?}");

        // Millimetre steps hit the same limit on a short walk.
        let mut walk = SyntheticWalk::new(ORIGIN, north(200.0), 0);
        walk.speed_mps = 0.001;
        assert!(matches!(walk.generate().unwrap_err(), SensorError::Core(WfError::Config(_))));
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod replay {
    use wf_core::{GeoPoint, RawHeading, Timestamp};
    use wf_guidance::{Alert, GuidanceObserver, NoopObserver};

    use super::helpers::{north, session_with, ORIGIN};
    use crate::{DeliveryPolicy, Replay, SensorSample, SyntheticWalk};

    #[derive(Default)]
    struct Cleared(Vec<(Timestamp, String)>);

    impl GuidanceObserver for Cleared {
        fn on_alert_cleared(&mut self, at: Timestamp, alert: &Alert) {
            self.0.push((at, alert.point_id.to_string()));
        }
    }

    #[test]
    fn expiry_fires_at_its_deadline_between_samples() {
        let mut session = session_with(vec![("a", ORIGIN)]);
        let samples = vec![
            SensorSample::location(Timestamp(1_000), ORIGIN),
            SensorSample::heading(Timestamp(9_000), RawHeading::compass(0.0)),
        ];
        let mut obs = Cleared::default();
        let summary = Replay::default().run(&mut session, samples, &mut obs).unwrap();

        assert_eq!(obs.0, vec![(Timestamp(6_000), "a".to_owned())]);
        assert_eq!(summary.alerts, 1);
        assert_eq!(summary.expiries, 1);
        assert_eq!(summary.last_at, Timestamp(9_000));
        assert!(session.active_alert().is_none());
    }

    #[test]
    fn flush_fires_trailing_expiry() {
        let mut session = session_with(vec![("a", ORIGIN)]);
        let samples = vec![SensorSample::location(Timestamp(0), ORIGIN)];

        let mut keep = Replay::default();
        keep.flush_expiries = false;
        keep.run(&mut session, samples, &mut NoopObserver).unwrap();
        assert!(session.active_alert().is_some());

        let summary = Replay::default().run(&mut session, Vec::new(), &mut NoopObserver).unwrap();
        assert_eq!(summary.expiries, 1);
        assert!(session.active_alert().is_none());
    }

    #[test]
    fn invalid_fixes_are_counted_not_fatal() {
        let mut session = session_with(vec![]);
        let samples = vec![
            SensorSample::location(Timestamp(0), GeoPoint { lat: -91.0, lon: 0.0 }),
            SensorSample::location(Timestamp(10), ORIGIN),
        ];
        let summary = Replay::default().run(&mut session, samples, &mut NoopObserver).unwrap();
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.locations, 1);
        assert_eq!(session.current_location(), Some(ORIGIN));
    }

    #[test]
    fn out_of_order_samples_are_sorted() {
        let mut session = session_with(vec![]);
        let samples = vec![
            SensorSample::location(Timestamp(500), north(10.0)),
            SensorSample::location(Timestamp(100), ORIGIN),
        ];
        Replay::default().run(&mut session, samples, &mut NoopObserver).unwrap();
        assert_eq!(session.current_location(), Some(north(10.0)));
    }

    #[test]
    fn coalescing_skips_intermediate_fixes() {
        // The walker passes within range of "mid" only on an intermediate fix.
        let mut session = session_with(vec![("mid", north(50.0))]);
        let samples = vec![
            SensorSample::location(Timestamp(0), ORIGIN),
            SensorSample::location(Timestamp(100), north(50.0)),
            SensorSample::location(Timestamp(200), north(100.0)),
        ];
        let summary = Replay::new(DeliveryPolicy::Coalesce, 1_000)
            .run(&mut session, samples, &mut NoopObserver)
            .unwrap();
        assert_eq!(summary.locations, 1);
        assert_eq!(summary.coalesced, 2);
        assert!(!session.is_announced("mid"));
    }

    #[test]
    fn synthetic_walk_triggers_point_on_route() {
        let mut session = session_with(vec![("ramp", north(30.0)), ("far", north(500.0))]);
        let samples = SyntheticWalk::new(ORIGIN, north(60.0), 11).generate().unwrap();
        let summary = Replay::default().run(&mut session, samples, &mut NoopObserver).unwrap();

        assert!(session.is_announced("ramp"));
        assert!(!session.is_announced("far"));
        assert_eq!(summary.alerts, 1);
        assert_eq!(summary.rejected, 0);
    }
}
