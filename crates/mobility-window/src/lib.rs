//! Window planning and segment clipping
//!
//! [`WindowPlanner`] partitions a trajectory's time extent into aligned
//! hourly or daily windows, optionally doubled into day and night parts.
//! [`SegmentClipper`] then produces, for each window, copies of the
//! overlapping segments trimmed to the window's boundaries.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use mobility_core::{Coordinate, Segment, Trajectory};
//! use mobility_window::{Resolution, SegmentClipper, WindowPlanner};
//!
//! let traj = Trajectory::new(vec![Segment::pause(
//!     Coordinate::new(0.0, 0.0),
//!     0.0,
//!     4.0 * 3600.0,
//!     true,
//! )])?;
//! let plan = WindowPlanner::new(Utc, Resolution::Hourly, false).plan(&traj);
//! assert_eq!(plan.len(), 3);
//!
//! let clipped = SegmentClipper::new().clip(&traj, &plan.windows[1]);
//! assert_eq!(clipped.total_duration(), 3600.0);
//! # Ok::<(), mobility_core::Error>(())
//! ```

pub mod clipper;
pub mod planner;

pub use clipper::{ClipAnomaly, ClippedSegmentSet, SegmentClipper};
pub use planner::{
    DayPart, Resolution, Window, WindowLabel, WindowPlan, WindowPlanner, DAY_START_HOUR,
    NIGHT_START_HOUR,
};
