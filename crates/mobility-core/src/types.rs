//! Trajectory types produced by the upstream imputation pipeline
//!
//! A [`Trajectory`] is an ordered run of flight/pause [`Segment`]s, each
//! carrying its start and end fix and whether it was observed or imputed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Linear blend `(1 - p) * self + p * other`
    pub fn lerp(&self, other: &Coordinate, p: f64) -> Coordinate {
        Coordinate {
            lat: (1.0 - p) * self.lat + p * other.lat,
            lon: (1.0 - p) * self.lon + p * other.lon,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A coordinate stamped with a unix time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPoint {
    pub coord: Coordinate,
    pub t: f64,
}

impl TimedPoint {
    pub const fn new(lat: f64, lon: f64, t: f64) -> Self {
        Self {
            coord: Coordinate::new(lat, lon),
            t,
        }
    }
}

/// Movement state of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentStatus {
    /// Continuous movement between two points
    Flight,
    /// Stationary dwell
    Pause,
}

impl SegmentStatus {
    /// Numeric code used by the imputation pipeline's matrix output
    pub fn code(&self) -> u8 {
        match self {
            SegmentStatus::Flight => 1,
            SegmentStatus::Pause => 2,
        }
    }

    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(SegmentStatus::Flight)
        } else if code == 2.0 {
            Some(SegmentStatus::Pause)
        } else {
            None
        }
    }
}

/// One flight or pause of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub status: SegmentStatus,
    pub start: TimedPoint,
    pub end: TimedPoint,
    /// `true` when the endpoints came from raw fixes, `false` when imputed
    pub observed: bool,
}

impl Segment {
    pub fn new(status: SegmentStatus, start: TimedPoint, end: TimedPoint, observed: bool) -> Self {
        Self {
            status,
            start,
            end,
            observed,
        }
    }

    /// Convenience constructor for a flight
    pub fn flight(start: TimedPoint, end: TimedPoint, observed: bool) -> Self {
        Self::new(SegmentStatus::Flight, start, end, observed)
    }

    /// Convenience constructor for a pause at a single location
    pub fn pause(at: Coordinate, t_start: f64, t_end: f64, observed: bool) -> Self {
        Self::new(
            SegmentStatus::Pause,
            TimedPoint { coord: at, t: t_start },
            TimedPoint { coord: at, t: t_end },
            observed,
        )
    }

    pub fn duration(&self) -> f64 {
        self.end.t - self.start.t
    }

    pub fn midpoint_time(&self) -> f64 {
        (self.start.t + self.end.t) / 2.0
    }

    pub fn is_flight(&self) -> bool {
        self.status == SegmentStatus::Flight
    }

    pub fn is_pause(&self) -> bool {
        self.status == SegmentStatus::Pause
    }

    /// Whether the segment's time extent intersects the open interval `(lo, hi)`
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        self.start.t < hi && self.end.t > lo
    }

    /// Position at time `t` by time-proportional linear interpolation.
    ///
    /// Returns `None` for a zero-duration segment, where the fraction is
    /// undefined. `t` outside the segment extrapolates along the same line.
    pub fn point_at(&self, t: f64) -> Option<Coordinate> {
        let span = self.duration();
        if span <= 0.0 {
            return None;
        }
        let p = (t - self.start.t) / span;
        Some(self.start.coord.lerp(&self.end.coord, p))
    }

    fn validate(&self, index: usize) -> Result<()> {
        if !(self.start.coord.is_finite()
            && self.end.coord.is_finite()
            && self.start.t.is_finite()
            && self.end.t.is_finite())
        {
            return Err(Error::non_finite(index));
        }
        if self.end.t < self.start.t {
            return Err(Error::InvalidSegment {
                index,
                reason: format!("ends at {} before it starts at {}", self.end.t, self.start.t),
            });
        }
        Ok(())
    }
}

/// A non-empty, time-ordered sequence of segments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    segments: Vec<Segment>,
}

impl Trajectory {
    /// Validate and wrap a segment sequence.
    ///
    /// Requires at least one segment, finite values, `t_end >= t_start` on
    /// every segment and non-decreasing start times. Temporal gaps between
    /// consecutive segments are accepted.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::EmptyTrajectory);
        }
        for (index, segment) in segments.iter().enumerate() {
            segment.validate(index)?;
        }
        for (index, pair) in segments.windows(2).enumerate() {
            if pair[1].start.t < pair[0].start.t {
                return Err(Error::UnorderedSegments { index: index + 1 });
            }
        }
        Ok(Self { segments })
    }

    /// Build from the imputation pipeline's `n x 8` matrix layout
    /// `[status, lat0, lon0, t0, lat1, lon1, t1, observed]` where status is
    /// 1 for a flight and 2 for a pause.
    pub fn from_rows(rows: &[[f64; 8]]) -> Result<Self> {
        let segments = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let status = SegmentStatus::from_code(row[0]).ok_or_else(|| Error::InvalidSegment {
                    index,
                    reason: format!("unknown status code {}", row[0]),
                })?;
                Ok(Segment::new(
                    status,
                    TimedPoint::new(row[1], row[2], row[3]),
                    TimedPoint::new(row[4], row[5], row[6]),
                    row[7] == 1.0,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Start time of the first segment
    pub fn start_time(&self) -> f64 {
        self.segments[0].start.t
    }

    /// End time of the last segment
    pub fn end_time(&self) -> f64 {
        self.segments[self.segments.len() - 1].end.t
    }

    pub fn pauses(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_pause())
    }
}

impl<'de> Deserialize<'de> for Trajectory {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let segments = Vec::<Segment>::deserialize(deserializer)?;
        Trajectory::new(segments).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
