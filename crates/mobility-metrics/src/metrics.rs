//! Feature computation for one clipped window
//!
//! All quantities are in SI base units (seconds, meters). Unit conversion for
//! the output table happens at assembly time.

use crate::entropy::{significant_places, SignificantPlaces};
use chrono::{DateTime, TimeZone, Timelike};
use mobility_core::{
    great_circle_distance, max_pairwise_distance, weighted_mean, Coordinate, Moments, Segment,
};
use mobility_window::{ClippedSegmentSet, Resolution, DAY_START_HOUR, NIGHT_START_HOUR};
use serde::{Deserialize, Serialize};

/// Thresholds used by [`MetricsComputer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsParams {
    /// A segment counts as home time when its mean distance to home is at most this
    pub home_radius_m: f64,
    /// Merge radius for significant-place clustering
    pub sig_place_radius_m: f64,
    /// Clusters must hold more than this many minutes to be significant
    pub sig_place_min_dwell_min: f64,
    /// Added to probabilities inside the entropy logarithm
    pub entropy_epsilon: f64,
    /// First local hour (inclusive) of the day part
    pub day_first_hour: u32,
    /// Last local hour (inclusive) of the day part
    pub day_last_hour: u32,
}

impl Default for MetricsParams {
    fn default() -> Self {
        Self {
            home_radius_m: 50.0,
            sig_place_radius_m: 50.0,
            sig_place_min_dwell_min: 15.0,
            entropy_epsilon: 1e-5,
            day_first_hour: DAY_START_HOUR,
            day_last_hour: NIGHT_START_HOUR - 1,
        }
    }
}

/// Features that are only computed at daily resolution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyMetrics {
    /// Observed seconds of segments whose midpoint falls in the day part
    pub obs_day: f64,
    /// Observed seconds of the remaining segments
    pub obs_night: f64,
    /// Pause-time weighted radius of gyration, meters
    pub radius: f64,
    /// Largest distance between any two segment endpoints, meters
    pub diameter: f64,
    pub significant_places: SignificantPlaces,
}

/// The feature vector of one window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowMetrics {
    /// Seconds covered by observed segments
    pub obs_duration: f64,
    /// Seconds spent within the home radius
    pub home_time: f64,
    /// Sum of rounded segment displacements, meters
    pub dist_traveled: f64,
    /// Farthest segment endpoint from home, meters
    pub max_dist_home: f64,
    pub total_flight_time: f64,
    /// Flight displacement, meters
    pub flight_length: Moments,
    /// Flight duration, seconds
    pub flight_duration: Moments,
    pub total_pause_time: f64,
    /// Pause duration, seconds
    pub pause_duration: Moments,
    pub daily: Option<DailyMetrics>,
}

impl WindowMetrics {
    /// A window without observed data is reported as missing
    pub fn is_degenerate(&self) -> bool {
        self.obs_duration == 0.0
    }
}

/// Computes [`WindowMetrics`] from clipped segments
#[derive(Debug, Clone)]
pub struct MetricsComputer<Tz: TimeZone> {
    tz: Tz,
    resolution: Resolution,
    params: MetricsParams,
}

impl<Tz: TimeZone> MetricsComputer<Tz> {
    pub fn new(tz: Tz, resolution: Resolution) -> Self {
        Self::with_params(tz, resolution, MetricsParams::default())
    }

    pub fn with_params(tz: Tz, resolution: Resolution, params: MetricsParams) -> Self {
        Self {
            tz,
            resolution,
            params,
        }
    }

    pub fn params(&self) -> &MetricsParams {
        &self.params
    }

    /// Compute the features of `clipped` relative to `home`.
    ///
    /// A pure function of its inputs.
    pub fn compute(&self, clipped: &ClippedSegmentSet, home: &Coordinate) -> WindowMetrics {
        self.compute_segments(clipped.segments(), home)
    }

    pub fn compute_segments(&self, segments: &[Segment], home: &Coordinate) -> WindowMetrics {
        let mut obs_duration = 0.0;
        let mut home_time = 0.0;
        let mut dist_traveled = 0.0;
        let mut max_dist_home = 0.0_f64;
        let mut flight_lengths = Vec::new();
        let mut flight_times = Vec::new();
        let mut pause_times = Vec::new();

        for seg in segments {
            let duration = seg.duration();
            if seg.observed {
                obs_duration += duration;
            }

            let d_start = great_circle_distance(home, &seg.start.coord);
            let d_end = great_circle_distance(home, &seg.end.coord);
            max_dist_home = max_dist_home.max(d_start).max(d_end);
            if (d_start + d_end) / 2.0 <= self.params.home_radius_m {
                home_time += duration;
            }

            let movement = great_circle_distance(&seg.start.coord, &seg.end.coord).round();
            dist_traveled += movement;

            if seg.is_flight() {
                flight_lengths.push(movement);
                flight_times.push(duration);
            } else {
                pause_times.push(duration);
            }
        }

        let total_pause_time: f64 = pause_times.iter().sum();
        let daily = (self.resolution == Resolution::Daily)
            .then(|| self.daily_metrics(segments, total_pause_time));

        WindowMetrics {
            obs_duration,
            home_time,
            dist_traveled,
            max_dist_home,
            total_flight_time: flight_times.iter().sum(),
            flight_length: Moments::of(&flight_lengths),
            flight_duration: Moments::of(&flight_times),
            total_pause_time,
            pause_duration: Moments::of(&pause_times),
            daily,
        }
    }

    fn daily_metrics(&self, segments: &[Segment], total_pause_time: f64) -> DailyMetrics {
        let mut obs_day = 0.0;
        let mut obs_night = 0.0;
        for seg in segments.iter().filter(|s| s.observed) {
            if self.in_day_part(seg.midpoint_time()) {
                obs_day += seg.duration();
            } else {
                obs_night += seg.duration();
            }
        }

        let pauses: Vec<&Segment> = segments.iter().filter(|s| s.is_pause()).collect();
        let radius = if total_pause_time > 0.0 {
            let weights: Vec<f64> = pauses.iter().map(|s| s.duration()).collect();
            let lats: Vec<f64> = pauses.iter().map(|s| s.start.coord.lat).collect();
            let lons: Vec<f64> = pauses.iter().map(|s| s.start.coord.lon).collect();
            match (weighted_mean(&lats, &weights), weighted_mean(&lons, &weights)) {
                (Some(lat), Some(lon)) => {
                    let centroid = Coordinate::new(lat, lon);
                    let spread: Vec<f64> = pauses
                        .iter()
                        .map(|s| great_circle_distance(&centroid, &s.start.coord))
                        .collect();
                    weighted_mean(&spread, &weights).unwrap_or(0.0)
                }
                _ => 0.0,
            }
        } else {
            0.0
        };

        let endpoints: Vec<Coordinate> = segments
            .iter()
            .flat_map(|s| [s.start.coord, s.end.coord])
            .collect();

        DailyMetrics {
            obs_day,
            obs_night,
            radius,
            diameter: max_pairwise_distance(&endpoints),
            significant_places: significant_places(
                segments,
                self.params.sig_place_radius_m,
                self.params.sig_place_min_dwell_min,
                self.params.entropy_epsilon,
            ),
        }
    }

    fn in_day_part(&self, t: f64) -> bool {
        let hour = DateTime::from_timestamp(t.floor() as i64, 0)
            .unwrap_or_default()
            .with_timezone(&self.tz)
            .hour();
        (self.params.day_first_hour..=self.params.day_last_hour).contains(&hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::Utc;
    use mobility_core::TimedPoint;

    const HOME: Coordinate = Coordinate::new(0.0, 0.0);
    // 2021-03-01T00:00:00Z
    const MARCH_1: f64 = 1_614_556_800.0;

    fn hourly() -> MetricsComputer<Utc> {
        MetricsComputer::new(Utc, Resolution::Hourly)
    }

    fn daily() -> MetricsComputer<Utc> {
        MetricsComputer::new(Utc, Resolution::Daily)
    }

    #[test]
    fn test_single_flight_at_equator() {
        let seg = Segment::flight(
            TimedPoint::new(0.0, 0.0, 0.0),
            TimedPoint::new(0.0, 0.01, 600.0),
            true,
        );
        let m = hourly().compute_segments(&[seg], &HOME);
        assert_relative_eq!(m.obs_duration, 600.0);
        assert_abs_diff_eq!(m.dist_traveled, 1112.0, epsilon = 2.0);
        assert_relative_eq!(m.total_flight_time, 600.0);
        assert_eq!(m.total_pause_time, 0.0);
        assert_eq!(m.pause_duration, Moments::default());
        assert_relative_eq!(m.flight_length.mean, m.dist_traveled);
        assert_eq!(m.flight_length.sd, 0.0);
        assert!(m.daily.is_none());
        // The mean distance of this flight to home is ~556 m.
        assert_eq!(m.home_time, 0.0);
    }

    #[test]
    fn test_home_time_and_max_distance() {
        let segs = [
            Segment::pause(HOME, 0.0, 1800.0, true),
            Segment::flight(
                TimedPoint::new(0.0, 0.0, 1800.0),
                TimedPoint::new(0.0, 0.02, 3600.0),
                false,
            ),
        ];
        let m = hourly().compute_segments(&segs, &HOME);
        assert_relative_eq!(m.home_time, 1800.0);
        assert_relative_eq!(m.obs_duration, 1800.0);
        assert_abs_diff_eq!(m.max_dist_home, 2224.0, epsilon = 3.0);
    }

    #[test]
    fn test_empty_window_is_degenerate() {
        let m = hourly().compute_segments(&[], &HOME);
        assert!(m.is_degenerate());
    }

    #[test]
    fn test_imputed_only_window_is_degenerate() {
        let m = hourly().compute_segments(&[Segment::pause(HOME, 0.0, 3600.0, false)], &HOME);
        assert!(m.is_degenerate());
        assert_relative_eq!(m.total_pause_time, 3600.0);
    }

    #[test]
    fn test_daily_day_night_observed_split() {
        let segs = [
            // Midpoint 04:00, night.
            Segment::pause(HOME, MARCH_1, MARCH_1 + 8.0 * 3600.0, true),
            // Midpoint 12:00, day.
            Segment::pause(HOME, MARCH_1 + 8.0 * 3600.0, MARCH_1 + 16.0 * 3600.0, true),
            // Midpoint 19:30, day but imputed.
            Segment::pause(HOME, MARCH_1 + 19.0 * 3600.0, MARCH_1 + 20.0 * 3600.0, false),
        ];
        let daily = daily().compute_segments(&segs, &HOME).daily.unwrap();
        assert_relative_eq!(daily.obs_day, 8.0 * 3600.0);
        assert_relative_eq!(daily.obs_night, 8.0 * 3600.0);
    }

    #[test]
    fn test_radius_of_two_weighted_places() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.04);
        let segs = [
            Segment::pause(a, MARCH_1, MARCH_1 + 3.0 * 3600.0, true),
            Segment::pause(b, MARCH_1 + 3.0 * 3600.0, MARCH_1 + 4.0 * 3600.0, true),
        ];
        let daily = daily().compute_segments(&segs, &HOME).daily.unwrap();
        // Centroid sits at lon 0.01: 1112 m from a, 3336 m from b.
        let expected = 0.75 * 1112.0 + 0.25 * 3336.0;
        assert_abs_diff_eq!(daily.radius, expected, epsilon = 5.0);
        assert_abs_diff_eq!(daily.diameter, 4448.0, epsilon = 5.0);
        assert_eq!(daily.significant_places.count, 2);
        assert!(daily.significant_places.entropy > 0.0);
    }

    #[test]
    fn test_no_pauses_gives_zero_radius() {
        let seg = Segment::flight(
            TimedPoint::new(0.0, 0.0, MARCH_1),
            TimedPoint::new(0.0, 0.01, MARCH_1 + 600.0),
            true,
        );
        let daily = daily().compute_segments(&[seg], &HOME).daily.unwrap();
        assert_eq!(daily.radius, 0.0);
        assert_eq!(daily.significant_places.count, 0);
        assert_eq!(daily.significant_places.entropy, 0.0);
    }
}
