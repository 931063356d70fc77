//! DataFrame export of summary tables

mod common;

use approx::assert_relative_eq;
use common::*;
use mobility_polars::{Error, SummaryDataFrameExt, SummaryFrameExt};
use mobility_summary::{SummaryConfig, SummaryTable};
use polars::prelude::*;

#[test]
fn test_shape_and_types() {
    let summary = hourly_summary();
    let df = summary.table.to_dataframe().unwrap();

    assert_eq!(df.shape(), (5, 16));
    assert_eq!(df.column("hour").unwrap().dtype(), &DataType::Int32);
    assert_eq!(df.column("year").unwrap().dtype(), &DataType::Int32);
    assert_eq!(df.column("obs_duration").unwrap().dtype(), &DataType::Float64);

    let hours: Vec<Option<i32>> = df.column("hour").unwrap().i32().unwrap().into_iter().collect();
    assert_eq!(hours, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
}

#[test]
fn test_missing_windows_become_null() {
    let df = hourly_summary().table.to_dataframe().unwrap();

    // 02:00-03:00 is entirely imputed.
    assert_eq!(extract_value(&df, "obs_duration", 1), None);
    assert_eq!(extract_value(&df, "home_time", 1), None);
    assert_relative_eq!(extract_value(&df, "home_time", 2).unwrap(), 60.0, epsilon = 1e-9);

    let observed = df.observed_windows().unwrap();
    assert_eq!(observed.height(), 4);

    let obs = df.summary_values("obs_duration").unwrap();
    assert_eq!(obs.iter().filter(|v| v.is_none()).count(), 1);
}

#[test]
fn test_empty_table_keeps_columns() {
    let table = SummaryTable::new(
        mobility_summary::schema::columns(SummaryConfig::daily().resolution, None),
    );
    let df = table.to_dataframe().unwrap();
    assert_eq!(df.shape(), (0, 21));
}

#[test]
fn test_column_errors() {
    let df = hourly_summary().table.to_dataframe().unwrap();
    assert!(matches!(df.summary_values("nope"), Err(Error::InvalidColumn(_))));
    assert!(matches!(df.summary_values("day"), Err(Error::TypeMismatch { .. })));
}
