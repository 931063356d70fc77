//! Property-based tests for window metrics

use approx::assert_abs_diff_eq;
use chrono::Utc;
use mobility_core::{Coordinate, Segment, TimedPoint, Trajectory};
use mobility_metrics::MetricsComputer;
use mobility_window::{Resolution, SegmentClipper, WindowPlanner};
use proptest::prelude::*;

fn segments_strategy() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(
        (
            -0.05..0.05f64,
            -0.05..0.05f64,
            60.0..5400.0f64,
            any::<bool>(),
            any::<bool>(),
        ),
        1..40,
    )
    .prop_map(|parts| {
        let mut t = 1_614_556_800.0;
        let mut here = Coordinate::new(0.0, 0.0);
        parts
            .into_iter()
            .map(|(dlat, dlon, duration, is_flight, observed)| {
                let t0 = t;
                t += duration;
                if is_flight {
                    let next = Coordinate::new(here.lat + dlat, here.lon + dlon);
                    let seg = Segment::flight(
                        TimedPoint { coord: here, t: t0 },
                        TimedPoint { coord: next, t },
                        observed,
                    );
                    here = next;
                    seg
                } else {
                    Segment::pause(here, t0, t, observed)
                }
            })
            .collect()
    })
}

proptest! {
    // The same inputs always produce the same features.
    #[test]
    fn prop_compute_is_pure(segments in segments_strategy()) {
        let computer = MetricsComputer::new(Utc, Resolution::Daily);
        let home = Coordinate::new(0.0, 0.0);
        let a = computer.compute_segments(&segments, &home);
        let b = computer.compute_segments(&segments, &home);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_feature_bounds(segments in segments_strategy()) {
        let computer = MetricsComputer::new(Utc, Resolution::Daily);
        let m = computer.compute_segments(&segments, &Coordinate::new(0.0, 0.0));
        let total: f64 = segments.iter().map(Segment::duration).sum();

        prop_assert!(m.obs_duration <= total + 1e-6);
        prop_assert!(m.home_time <= total + 1e-6);
        prop_assert!((m.total_flight_time + m.total_pause_time - total).abs() < 1e-6);
        prop_assert!(m.dist_traveled >= 0.0);
        prop_assert!(m.flight_length.sd >= 0.0);
        prop_assert!(m.pause_duration.sd >= 0.0);

        let daily = m.daily.unwrap();
        prop_assert!((daily.obs_day + daily.obs_night - m.obs_duration).abs() < 1e-6);
        prop_assert!(daily.radius >= 0.0);
        prop_assert!(daily.radius <= daily.diameter * 1.01 + 1e-3);
        prop_assert!(daily.significant_places.entropy >= 0.0);
    }
}

#[test]
fn test_clipped_flight_scenario() {
    // One ten-minute flight inside the only daily window.
    let traj = Trajectory::new(vec![Segment::flight(
        TimedPoint::new(0.0, 0.0, 1_614_556_800.0 + 600.0),
        TimedPoint::new(0.0, 0.01, 1_614_556_800.0 + 1200.0),
        true,
    )])
    .unwrap();
    let plan = WindowPlanner::new(Utc, Resolution::Daily, false).plan(&traj);
    assert_eq!(plan.len(), 1);

    let clipped = SegmentClipper::new().clip(&traj, &plan.windows[0]);
    let m = MetricsComputer::new(Utc, Resolution::Daily)
        .compute(&clipped, &Coordinate::new(0.0, 0.0));

    assert_abs_diff_eq!(m.obs_duration / 60.0, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.dist_traveled, 1112.0, epsilon = 2.0);
    assert_abs_diff_eq!(m.total_flight_time / 60.0, 10.0, epsilon = 1e-9);
    assert_eq!(m.total_pause_time, 0.0);
}
