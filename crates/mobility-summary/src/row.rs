//! One summary row per window, in output units

use mobility_metrics::WindowMetrics;
use mobility_window::{DayPart, Resolution, WindowLabel};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;
const KM: f64 = 1000.0;

/// Feature values of one window, after the identifying columns.
///
/// A window without observed data carries NaN in every value.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub label: WindowLabel,
    pub part: DayPart,
    pub values: Vec<f64>,
}

impl FeatureRow {
    /// Convert `metrics` to table units and append the place hours.
    ///
    /// Daily metrics missing at daily resolution are filled with NaN.
    pub fn from_metrics(
        label: WindowLabel,
        part: DayPart,
        resolution: Resolution,
        metrics: &WindowMetrics,
        place_hours: &[f64],
    ) -> Self {
        let m = metrics;
        let mut values = match resolution {
            Resolution::Hourly => vec![
                m.obs_duration / MINUTE,
                m.home_time / MINUTE,
                m.dist_traveled,
                m.max_dist_home,
                m.total_flight_time / MINUTE,
                m.flight_length.mean,
                m.flight_length.sd,
                m.flight_duration.mean / MINUTE,
                m.flight_duration.sd / MINUTE,
                m.total_pause_time / MINUTE,
                m.pause_duration.mean / MINUTE,
                m.pause_duration.sd / MINUTE,
            ],
            Resolution::Daily => {
                let (obs_day, obs_night, radius, diameter, count, entropy) = match m.daily {
                    Some(daily) => (
                        daily.obs_day / HOUR,
                        daily.obs_night / HOUR,
                        daily.radius / KM,
                        daily.diameter / KM,
                        daily.significant_places.count as f64,
                        daily.significant_places.entropy,
                    ),
                    None => (f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN),
                };
                vec![
                    m.obs_duration / HOUR,
                    obs_day,
                    obs_night,
                    m.home_time / HOUR,
                    m.dist_traveled / KM,
                    m.max_dist_home / KM,
                    radius,
                    diameter,
                    count,
                    entropy,
                    m.total_flight_time / HOUR,
                    m.flight_length.mean / KM,
                    m.flight_length.sd / KM,
                    m.flight_duration.mean / HOUR,
                    m.flight_duration.sd / HOUR,
                    m.total_pause_time / HOUR,
                    m.pause_duration.mean / HOUR,
                    m.pause_duration.sd / HOUR,
                ]
            }
        };
        values.extend_from_slice(place_hours);
        Self {
            label,
            part,
            values,
        }
    }

    /// Row of a window without observed data
    pub fn degenerate(
        label: WindowLabel,
        part: DayPart,
        resolution: Resolution,
        place_columns: usize,
    ) -> Self {
        let width = value_count(resolution) + place_columns;
        Self {
            label,
            part,
            values: vec![f64::NAN; width],
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.values.iter().all(|v| v.is_nan())
    }

    /// Identifying columns followed by the values
    pub fn to_cells(&self, resolution: Resolution) -> Vec<f64> {
        let mut cells = vec![
            f64::from(self.label.year),
            f64::from(self.label.month),
            f64::from(self.label.day),
        ];
        if resolution == Resolution::Hourly {
            cells.push(self.label.hour.map_or(f64::NAN, f64::from));
        }
        cells.extend_from_slice(&self.values);
        cells
    }
}

/// Number of non-identifying, non-place columns at `resolution`
pub fn value_count(resolution: Resolution) -> usize {
    crate::schema::base_columns(resolution).len() - crate::schema::identifying_count(resolution)
}
