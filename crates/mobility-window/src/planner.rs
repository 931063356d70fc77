//! Aligned window planning
//!
//! Windows are aligned to local clock boundaries of a caller-supplied
//! timezone. Hourly series start at the first full hour after the data
//! begins and stop at the last full hour before it ends; daily series run
//! from local midnight of the first day through the end of the last day.
//! Each daily window ends at the next local midnight, so days across a DST
//! change last 23 or 25 hours.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use mobility_core::Trajectory;
use serde::{Deserialize, Serialize};
use std::fmt;

const HOUR: i64 = 3_600;
const DAY: i64 = 24 * HOUR;

/// Local hour at which the day part begins
pub const DAY_START_HOUR: u32 = 8;
/// Local hour at which the night part begins
pub const NIGHT_START_HOUR: u32 = 20;

/// Window length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Hourly,
    #[default]
    Daily,
}

impl Resolution {
    pub fn name(&self) -> &'static str {
        match self {
            Resolution::Hourly => "hourly",
            Resolution::Daily => "daily",
        }
    }
}

/// Which part of a calendar window a [`Window`] covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPart {
    /// The whole hour or day
    Whole,
    /// 08:00 to 20:00 local
    Day,
    /// The rest of the day, as two disjoint sub-intervals
    Night,
}

impl DayPart {
    /// Column suffix used when day and night rows are merged
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            DayPart::Whole => None,
            DayPart::Day => Some("datetime"),
            DayPart::Night => Some("nighttime"),
        }
    }
}

/// Calendar identity of a window in local time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowLabel {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Present for hourly windows only
    pub hour: Option<u32>,
}

impl fmt::Display for WindowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)?;
        if let Some(hour) = self.hour {
            write!(f, " {hour}:00")?;
        }
        Ok(())
    }
}

/// One window of a planned series
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Position in the emitted series
    pub index: usize,
    /// Position of the calendar hour/day; day and night of one date share it
    pub calendar_index: usize,
    /// Start of the calendar window, unix seconds
    pub start_t: i64,
    /// End of the calendar window, unix seconds
    pub end_t: i64,
    pub label: WindowLabel,
    pub part: DayPart,
    /// Local 08:00 and 20:00 of the window's date, when day/night split
    pub day_bounds: Option<(i64, i64)>,
    /// The calendar window starts the series
    pub opens_series: bool,
    /// The calendar window ends the series
    pub closes_series: bool,
}

impl Window {
    /// Neither the first nor the last calendar window of the series
    pub fn is_interior(&self) -> bool {
        !self.opens_series && !self.closes_series
    }

    /// Whether clipping moves segment endpoints onto `boundary`.
    ///
    /// Every interval edge is cut except the start and the end of the whole
    /// series, where the data is not guaranteed to cover the boundary.
    pub fn cuts_at(&self, boundary: f64) -> bool {
        !(self.opens_series && boundary == self.start_t as f64)
            && !(self.closes_series && boundary == self.end_t as f64)
    }

    /// The time intervals this window covers, in order
    pub fn intervals(&self) -> Vec<(f64, f64)> {
        let (start, end) = (self.start_t as f64, self.end_t as f64);
        match (self.part, self.day_bounds) {
            (DayPart::Day, Some((t2, t3))) => vec![(t2 as f64, t3 as f64)],
            (DayPart::Night, Some((t2, t3))) => vec![(start, t2 as f64), (t3 as f64, end)],
            _ => vec![(start, end)],
        }
    }

    /// Total length of [`Window::intervals`] in seconds
    pub fn covered_seconds(&self) -> f64 {
        self.intervals().iter().map(|(lo, hi)| hi - lo).sum()
    }

    /// Human-readable key for the visit log
    pub fn log_key(&self) -> String {
        match self.part.suffix() {
            Some(suffix) => format!("{}, {}", self.label, suffix),
            None => self.label.to_string(),
        }
    }
}

/// The ordered windows for one trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPlan {
    pub resolution: Resolution,
    pub split_day_night: bool,
    /// First calendar boundary, unix seconds
    pub start_stamp: i64,
    /// Last calendar boundary, unix seconds
    pub end_stamp: i64,
    /// Number of calendar windows; half the window count when split
    pub calendar_count: usize,
    pub windows: Vec<Window>,
}

impl WindowPlan {
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Window> {
        self.windows.iter()
    }
}

/// Computes aligned window boundaries in a given timezone
#[derive(Debug, Clone)]
pub struct WindowPlanner<Tz: TimeZone> {
    tz: Tz,
    resolution: Resolution,
    split_day_night: bool,
}

impl<Tz: TimeZone> WindowPlanner<Tz> {
    /// Day/night splitting only applies to daily windows and is ignored for
    /// hourly ones.
    pub fn new(tz: Tz, resolution: Resolution, split_day_night: bool) -> Self {
        Self {
            tz,
            resolution,
            split_day_night: split_day_night && resolution == Resolution::Daily,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn split_day_night(&self) -> bool {
        self.split_day_night
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Plan the window series spanning `traj`.
    ///
    /// A non-positive span yields an empty plan, not an error.
    pub fn plan(&self, traj: &Trajectory) -> WindowPlan {
        let first = whole_seconds(traj.start_time());
        let last = whole_seconds(traj.end_time());

        let (start_stamp, boundaries) = match self.resolution {
            Resolution::Hourly => {
                let start = self.floor_hour(first) + HOUR;
                let end = self.floor_hour(last);
                let count = if end > start { (end - start) / HOUR } else { 0 };
                (start, (0..=count).map(|k| start + k * HOUR).collect::<Vec<_>>())
            }
            Resolution::Daily => {
                let start = self.floor_day(first);
                (start, self.midnights(start, first, last))
            }
        };
        let end_stamp = boundaries.last().copied().unwrap_or(start_stamp);
        let calendar_count = boundaries.len().saturating_sub(1);
        let per_calendar = if self.split_day_night { 2 } else { 1 };

        let mut windows = Vec::with_capacity(calendar_count * per_calendar);
        for index in 0..calendar_count * per_calendar {
            let calendar_index = index / per_calendar;
            let start_t = boundaries[calendar_index];
            let end_t = boundaries[calendar_index + 1];
            let local = self.local(start_t);

            let part = match (self.split_day_night, index % 2) {
                (false, _) => DayPart::Whole,
                (true, 0) => DayPart::Day,
                (true, _) => DayPart::Night,
            };
            let day_bounds = self.split_day_night.then(|| {
                (
                    self.at_local_hour(local.date_naive(), DAY_START_HOUR, start_t),
                    self.at_local_hour(local.date_naive(), NIGHT_START_HOUR, start_t),
                )
            });

            windows.push(Window {
                index,
                calendar_index,
                start_t,
                end_t,
                label: WindowLabel {
                    year: local.year(),
                    month: local.month(),
                    day: local.day(),
                    hour: (self.resolution == Resolution::Hourly).then(|| local.hour()),
                },
                part,
                day_bounds,
                opens_series: calendar_index == 0,
                closes_series: calendar_index + 1 == calendar_count,
            });
        }

        WindowPlan {
            resolution: self.resolution,
            split_day_night: self.split_day_night,
            start_stamp,
            end_stamp,
            calendar_count,
            windows,
        }
    }

    fn local(&self, stamp: i64) -> DateTime<Tz> {
        // Every i64 second within chrono's range maps to exactly one instant.
        DateTime::from_timestamp(stamp, 0)
            .unwrap_or_default()
            .with_timezone(&self.tz)
    }

    /// Unix time of the local hour containing `stamp`
    fn floor_hour(&self, stamp: i64) -> i64 {
        let local = self.local(stamp);
        let offset = i64::from(local.minute()) * 60 + i64::from(local.second());
        stamp - offset
    }

    /// Unix time of local midnight of the date containing `stamp`
    fn floor_day(&self, stamp: i64) -> i64 {
        let local = self.local(stamp);
        let since_midnight = i64::from(local.num_seconds_from_midnight());
        self.at_local_hour(local.date_naive(), 0, stamp - since_midnight)
    }

    /// Local midnights from the date of `first` through the day after the
    /// date of `last`; `start` is the first of them.
    fn midnights(&self, start: i64, first: i64, last: i64) -> Vec<i64> {
        let last_date = self.local(last).date_naive();
        let mut date = self.local(first).date_naive();
        let mut stamps = vec![start];
        while date <= last_date {
            let Some(next) = date.succ_opt() else { break };
            let previous = stamps[stamps.len() - 1];
            stamps.push(self.at_local_hour(next, 0, previous + DAY));
            date = next;
        }
        stamps
    }

    /// Unix time of `hour`:00 local on `date`, or `fallback_base + hour`
    /// hours when that wall-clock time does not exist (DST gap).
    fn at_local_hour(&self, date: NaiveDate, hour: u32, fallback_base: i64) -> i64 {
        date.and_hms_opt(hour, 0, 0)
            .and_then(|naive: NaiveDateTime| self.tz.from_local_datetime(&naive).earliest())
            .map(|dt| dt.timestamp())
            .unwrap_or(fallback_base + i64::from(hour) * HOUR)
    }
}

fn whole_seconds(t: f64) -> i64 {
    t.floor() as i64
}
