//! Clipping trajectory segments to window boundaries
//!
//! For each interval a window covers, the segments overlapping it are copied.
//! The first copy's start and the last copy's end are moved onto the
//! interval boundaries, with the new positions found by time-proportional
//! linear interpolation along the original segment. A lone overlapping
//! segment has both ends moved. Segments strictly inside the interval are
//! left untouched. The only edges never cut are the start and the end of the
//! whole series (see [`Window::cuts_at`]), so a segment spanning both night
//! sub-intervals is split between them rather than counted twice.
//!
//! Interior windows always land exactly on their bounds, extrapolating along
//! the edge segment across a gap. On the first and last calendar window the
//! data may start or stop inside the window, so an edge there is only cut
//! where a segment actually crosses it.

use crate::planner::Window;
use mobility_core::{Segment, TimedPoint, Trajectory};
use tracing::warn;

/// Anomalies recovered while clipping a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipAnomaly {
    /// A zero-duration segment sits on an interval edge, so no position can
    /// be interpolated; its raw endpoint was kept.
    ZeroDurationSegment {
        /// Index of the segment in the trajectory
        segment_index: usize,
        /// The boundary that could not be applied, unix seconds
        boundary: f64,
    },
}

/// Segment copies trimmed to a window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClippedSegmentSet {
    segments: Vec<Segment>,
    anomalies: Vec<ClipAnomaly>,
}

impl ClippedSegmentSet {
    /// Wrap already-clipped segments, e.g. for feeding the metrics directly
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            anomalies: Vec::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn anomalies(&self) -> &[ClipAnomaly] {
        &self.anomalies
    }

    pub fn is_flagged(&self) -> bool {
        !self.anomalies.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Sum of segment durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(Segment::duration).sum()
    }
}

/// Selects and trims the segments of a trajectory for one window
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentClipper;

impl SegmentClipper {
    pub fn new() -> Self {
        Self
    }

    /// Clip `traj` to `window`.
    ///
    /// Night windows are handled as two independent intervals whose clipped
    /// segments are concatenated in time order.
    pub fn clip(&self, traj: &Trajectory, window: &Window) -> ClippedSegmentSet {
        let mut out = ClippedSegmentSet::default();
        for (lo, hi) in window.intervals() {
            self.clip_interval(traj, lo, hi, window, &mut out);
        }
        for anomaly in &out.anomalies {
            warn!(window = %window.log_key(), ?anomaly, "left segment endpoint unclipped");
        }
        out
    }

    fn clip_interval(
        &self,
        traj: &Trajectory,
        lo: f64,
        hi: f64,
        window: &Window,
        out: &mut ClippedSegmentSet,
    ) {
        let selected: Vec<usize> = traj
            .iter()
            .enumerate()
            .filter(|(_, s)| s.overlaps(lo, hi))
            .map(|(i, _)| i)
            .collect();

        let offset = out.segments.len();
        out.segments
            .extend(selected.iter().map(|&i| traj.segments()[i]));

        let (Some(&first), Some(&last)) = (selected.first(), selected.last()) else {
            return;
        };
        let last_slot = offset + selected.len() - 1;
        let interior = window.is_interior();

        // Both ends are interpolated from the original segment, so a lone
        // segment's second cut does not see the first.
        let first_seg = &traj.segments()[first];
        if window.cuts_at(lo) && (interior || first_seg.start.t < lo) {
            match cut_point(first_seg, lo) {
                Some(p) => out.segments[offset].start = p,
                None => out.anomalies.push(ClipAnomaly::ZeroDurationSegment {
                    segment_index: first,
                    boundary: lo,
                }),
            }
        }
        let last_seg = &traj.segments()[last];
        if window.cuts_at(hi) && (interior || last_seg.end.t > hi) {
            match cut_point(last_seg, hi) {
                Some(p) => out.segments[last_slot].end = p,
                None => out.anomalies.push(ClipAnomaly::ZeroDurationSegment {
                    segment_index: last,
                    boundary: hi,
                }),
            }
        }
    }
}

fn cut_point(seg: &Segment, boundary: f64) -> Option<TimedPoint> {
    seg.point_at(boundary).map(|coord| TimedPoint { coord, t: boundary })
}
