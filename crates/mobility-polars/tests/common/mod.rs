//! Common test utilities for mobility-polars tests

#![allow(dead_code)]

use mobility_core::{Coordinate, Segment, Trajectory};
use mobility_summary::{summarize, Summary, SummaryConfig};
use polars::prelude::*;

/// 2021-03-01T00:00:00Z
pub const MARCH_1: f64 = 1_614_556_800.0;
pub const H: f64 = 3600.0;
pub const HOME: Coordinate = Coordinate::new(0.0, 0.0);

/// Six hours at home with an imputed hole from 02:00 to 03:00
pub fn hourly_summary() -> Summary {
    let traj = Trajectory::new(vec![
        Segment::pause(HOME, MARCH_1, MARCH_1 + 2.0 * H, true),
        Segment::pause(HOME, MARCH_1 + 2.0 * H, MARCH_1 + 3.0 * H, false),
        Segment::pause(HOME, MARCH_1 + 3.0 * H, MARCH_1 + 6.0 * H, true),
    ])
    .unwrap();
    summarize(&traj, &HOME, chrono::Utc, &SummaryConfig::hourly(), None).unwrap()
}

/// Extract a single value from a DataFrame
pub fn extract_value(df: &DataFrame, col_name: &str, row: usize) -> Option<f64> {
    df.column(col_name).unwrap().f64().unwrap().get(row)
}
