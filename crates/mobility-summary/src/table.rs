//! Assembled summary table and the day/night reshape

use crate::schema::{merged_columns, PER_HALF_DROPPED};

/// Row-major table of summary values.
///
/// Identifying columns hold whole numbers stored as `f64`; missing values
/// are NaN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl SummaryTable {
    /// Empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the column count
    pub fn push_row(&mut self, row: Vec<f64>) -> mobility_core::Result<()> {
        if row.len() != self.columns.len() {
            return Err(mobility_core::Error::InvalidInput(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of the named column
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[i]).collect())
    }

    pub fn get(&self, row: usize, name: &str) -> Option<f64> {
        let i = self.column_index(name)?;
        self.rows.get(row).map(|r| r[i])
    }

    /// Merge alternating day and night rows into one row per date.
    ///
    /// Both halves lose `obs_day`/`obs_night`; the remaining values are
    /// suffixed `_datetime` and `_nighttime`, and a combined `obs_duration`
    /// follows the date columns. The combined duration sums whichever halves
    /// are observed and is NaN only when neither is.
    pub fn merge_day_night(&self) -> SummaryTable {
        let kept: Vec<usize> = (3..self.columns.len())
            .filter(|&i| !PER_HALF_DROPPED.contains(&self.columns[i].as_str()))
            .collect();
        let obs = self.column_index("obs_duration");

        let rows = self
            .rows
            .chunks(2)
            .map(|pair| {
                let day = &pair[0];
                let night = pair.get(1);
                let mut row: Vec<f64> = day[..3.min(day.len())].to_vec();

                let combined = match obs {
                    Some(i) => sum_observed(day[i], night.map_or(f64::NAN, |n| n[i])),
                    None => f64::NAN,
                };
                row.push(combined);
                row.extend(kept.iter().map(|&i| day[i]));
                row.extend(kept.iter().map(|&i| night.map_or(f64::NAN, |n| n[i])));
                row
            })
            .collect();

        SummaryTable {
            columns: merged_columns(&self.columns),
            rows,
        }
    }
}

fn sum_observed(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => f64::NAN,
        (true, false) => b,
        (false, true) => a,
        (false, false) => a + b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::columns;
    use mobility_window::Resolution;

    fn daily_row(day: f64, obs: f64) -> Vec<f64> {
        let mut row = vec![2021.0, 3.0, day, obs, 0.1, 0.2];
        row.extend((6..21).map(|i| i as f64));
        row
    }

    #[test]
    fn test_merge_sums_observed_duration() {
        let mut table = SummaryTable::new(columns(Resolution::Daily, None));
        table.push_row(daily_row(1.0, 5.0)).unwrap();
        table.push_row(daily_row(1.0, 3.0)).unwrap();

        let merged = table.merge_day_night();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(0, "obs_duration"), Some(8.0));
        assert_eq!(merged.get(0, "obs_duration_datetime"), Some(5.0));
        assert_eq!(merged.get(0, "obs_duration_nighttime"), Some(3.0));
        assert_eq!(merged.get(0, "home_time_nighttime"), Some(6.0));
        assert!(merged.column_index("obs_day").is_none());
        assert!(merged.column_index("obs_night_datetime").is_none());
        assert_eq!(merged.rows()[0].len(), merged.columns().len());
    }

    #[test]
    fn test_merge_with_missing_half() {
        let mut table = SummaryTable::new(columns(Resolution::Daily, None));
        let mut night = vec![2021.0, 3.0, 1.0];
        night.extend(std::iter::repeat(f64::NAN).take(18));
        table.push_row(daily_row(1.0, 5.0)).unwrap();
        table.push_row(night.clone()).unwrap();
        table.push_row(night.clone()).unwrap();
        table.push_row(night).unwrap();

        let merged = table.merge_day_night();
        assert_eq!(merged.get(0, "obs_duration"), Some(5.0));
        assert!(merged.get(1, "obs_duration").unwrap().is_nan());
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = SummaryTable::new(columns(Resolution::Hourly, None));
        assert!(table.push_row(vec![1.0; 3]).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_merge_empty_table_keeps_schema() {
        let table = SummaryTable::new(columns(Resolution::Daily, None));
        let merged = table.merge_day_night();
        assert!(merged.is_empty());
        assert_eq!(merged.columns().len(), 36);
    }
}
