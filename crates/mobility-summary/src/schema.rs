//! Column layout of summary tables

use mobility_window::Resolution;

/// Hourly columns; durations in minutes, distances in meters
pub const HOURLY_COLUMNS: [&str; 16] = [
    "year",
    "month",
    "day",
    "hour",
    "obs_duration",
    "home_time",
    "dist_traveled",
    "max_dist_home",
    "total_flight_time",
    "av_flight_length",
    "sd_flight_length",
    "av_flight_duration",
    "sd_flight_duration",
    "total_pause_time",
    "av_pause_duration",
    "sd_pause_duration",
];

/// Daily columns; durations in hours, distances in kilometers
pub const DAILY_COLUMNS: [&str; 21] = [
    "year",
    "month",
    "day",
    "obs_duration",
    "obs_day",
    "obs_night",
    "home_time",
    "dist_traveled",
    "max_dist_home",
    "radius",
    "diameter",
    "num_sig_places",
    "entropy",
    "total_flight_time",
    "av_flight_length",
    "sd_flight_length",
    "av_flight_duration",
    "sd_flight_duration",
    "total_pause_time",
    "av_pause_duration",
    "sd_pause_duration",
];

/// Bucket for dwell time matching no requested category
pub const OTHER_COLUMN: &str = "other";

pub const DATETIME_SUFFIX: &str = "_datetime";
pub const NIGHTTIME_SUFFIX: &str = "_nighttime";

/// Columns dropped from both halves when day and night rows are merged
pub const PER_HALF_DROPPED: [&str; 2] = ["obs_day", "obs_night"];

pub fn base_columns(resolution: Resolution) -> &'static [&'static str] {
    match resolution {
        Resolution::Hourly => &HOURLY_COLUMNS,
        Resolution::Daily => &DAILY_COLUMNS,
    }
}

/// Number of leading calendar columns (year, month, day[, hour])
pub fn identifying_count(resolution: Resolution) -> usize {
    match resolution {
        Resolution::Hourly => 4,
        Resolution::Daily => 3,
    }
}

/// Full column list, with one column per place category and a trailing
/// [`OTHER_COLUMN`] when categories are requested
pub fn columns(resolution: Resolution, places: Option<&[String]>) -> Vec<String> {
    let mut cols: Vec<String> = base_columns(resolution)
        .iter()
        .map(|c| c.to_string())
        .collect();
    if let Some(places) = places {
        cols.extend(places.iter().cloned());
        cols.push(OTHER_COLUMN.to_string());
    }
    cols
}

/// Columns after merging day and night rows.
///
/// The three date columns come first, then the combined `obs_duration`,
/// then every remaining column suffixed for the day half and for the night
/// half, without the per-half `obs_day`/`obs_night`.
pub fn merged_columns(columns: &[String]) -> Vec<String> {
    let (ids, rest) = columns.split_at(columns.len().min(3));
    let kept: Vec<&String> = rest
        .iter()
        .filter(|c| !PER_HALF_DROPPED.contains(&c.as_str()))
        .collect();

    let mut out: Vec<String> = ids.to_vec();
    out.push("obs_duration".to_string());
    for suffix in [DATETIME_SUFFIX, NIGHTTIME_SUFFIX] {
        out.extend(kept.iter().map(|c| format!("{c}{suffix}")));
    }
    out
}
