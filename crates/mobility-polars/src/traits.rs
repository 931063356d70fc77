//! DataFrame conversion and helpers for summary tables

use crate::{Error, Result};
use mobility_summary::SummaryTable;
use polars::prelude::*;

/// Calendar columns, exported as `Int32`
pub const IDENTIFYING_COLUMNS: [&str; 4] = ["year", "month", "day", "hour"];

/// Export of a [`SummaryTable`] as a Polars DataFrame
pub trait SummaryFrameExt {
    /// One column per summary column, in order.
    ///
    /// Calendar columns are `Int32`, everything else `Float64`. NaN cells
    /// (windows without observed data) become nulls.
    fn to_dataframe(&self) -> Result<DataFrame>;
}

impl SummaryFrameExt for SummaryTable {
    fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns().len());

        for (i, name) in self.columns().iter().enumerate() {
            let cells = self.rows().iter().map(|row| nan_to_none(row[i]));
            let series = if IDENTIFYING_COLUMNS.contains(&name.as_str()) {
                let values: Vec<Option<i32>> = cells.map(|v| v.map(|x| x as i32)).collect();
                Series::new(PlSmallStr::from(name.as_str()), values)
            } else {
                let values: Vec<Option<f64>> = cells.collect();
                Series::new(PlSmallStr::from(name.as_str()), values)
            };
            columns.push(series.into());
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Queries over an exported summary DataFrame
pub trait SummaryDataFrameExt {
    /// Values of a `Float64` column, nulls as `None`
    fn summary_values(&self, column: &str) -> Result<Vec<Option<f64>>>;

    /// Rows of windows with observed data
    fn observed_windows(&self) -> Result<DataFrame>;
}

impl SummaryDataFrameExt for DataFrame {
    fn summary_values(&self, column: &str) -> Result<Vec<Option<f64>>> {
        let col = self
            .column(column)
            .map_err(|_| Error::InvalidColumn(column.to_string()))?;
        match col.dtype() {
            DataType::Float64 => Ok(col.f64()?.into_iter().collect()),
            dt => Err(Error::TypeMismatch {
                expected: "Float64".to_string(),
                got: format!("{:?}", dt),
            }),
        }
    }

    fn observed_windows(&self) -> Result<DataFrame> {
        let mask = self
            .column("obs_duration")
            .map_err(|_| Error::InvalidColumn("obs_duration".to_string()))?
            .is_not_null();
        Ok(self.filter(&mask)?)
    }
}

fn nan_to_none(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}
