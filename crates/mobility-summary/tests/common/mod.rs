//! Shared trajectory builders for integration tests

#![allow(dead_code)]

use mobility_core::{Coordinate, Segment, TimedPoint, Trajectory};

/// 2021-03-01T00:00:00Z
pub const MARCH_1: f64 = 1_614_556_800.0;
pub const H: f64 = 3600.0;
pub const HOME: Coordinate = Coordinate::new(0.0, 0.0);

/// One piece of a hand-written trajectory
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    pub hours: f64,
    pub flight: bool,
    pub observed: bool,
}

pub fn pause(hours: f64, observed: bool) -> Piece {
    Piece {
        hours,
        flight: false,
        observed,
    }
}

pub fn flight(hours: f64, observed: bool) -> Piece {
    Piece {
        hours,
        flight: true,
        observed,
    }
}

/// Gap-free trajectory starting at `start`; every flight moves 0.001 deg east
pub fn contiguous(start: f64, pieces: &[Piece]) -> Trajectory {
    let mut t = start;
    let mut lon = 0.0;
    let segments = pieces
        .iter()
        .map(|p| {
            let t0 = t;
            t += p.hours * H;
            if p.flight {
                let from = TimedPoint::new(0.0, lon, t0);
                lon += 0.001;
                Segment::flight(from, TimedPoint::new(0.0, lon, t), p.observed)
            } else {
                Segment::pause(Coordinate::new(0.0, lon), t0, t, p.observed)
            }
        })
        .collect();
    Trajectory::new(segments).unwrap()
}

/// Seconds of observed data inside `[lo, hi]`
pub fn observed_overlap(traj: &Trajectory, lo: f64, hi: f64) -> f64 {
    traj.iter()
        .filter(|s| s.observed)
        .map(|s| (s.end.t.min(hi) - s.start.t.max(lo)).max(0.0))
        .sum()
}
