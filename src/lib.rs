//! Windowed mobility statistics over imputed GPS trajectories
//!
//! This crate re-exports the workspace crates:
//!
//! - [`mobility_core`]: trajectory types, geodesy, reductions and pause clustering
//! - [`mobility_window`]: hourly/daily window planning and segment clipping
//! - [`mobility_metrics`]: per-window mobility features
//! - [`mobility_places`]: place-of-interest geometries and dwell attribution
//! - [`mobility_summary`]: summary tables, visit logs and batch runs
//! - `mobility_polars` (feature `polars`): DataFrame export
//!
//! # Example
//!
//! ```rust
//! use mobility_stats::prelude::*;
//! use chrono::Utc;
//!
//! let home = Coordinate::new(0.0, 0.0);
//! let traj = Trajectory::new(vec![Segment::pause(home, 0.0, 3.0 * 86_400.0 - 1.0, true)])?;
//!
//! let config = SummaryConfig::daily().with_split_day_night(true);
//! let summary = summarize(&traj, &home, Utc, &config, None)?;
//! assert_eq!(summary.table.len(), 3);
//! assert_eq!(summary.table.get(1, "obs_duration"), Some(24.0));
//! # Ok::<(), mobility_stats::Error>(())
//! ```

pub use mobility_core;
pub use mobility_metrics;
pub use mobility_places;
pub use mobility_summary;
pub use mobility_window;

#[cfg(feature = "polars")]
pub use mobility_polars;

pub use mobility_core::{Coordinate, Error, Result, Segment, SegmentStatus, TimedPoint, Trajectory};
pub use mobility_places::{overpass_query, GeometryIndex};
pub use mobility_summary::{
    run_batch, summarize, summarize_both, FailurePolicy, Summary, SummaryConfig, SummaryTable,
    VisitLog, VisitLogMap, WindowAssembler,
};
pub use mobility_window::Resolution;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use mobility_core::prelude::*;
    pub use mobility_places::{GeometryIndex, PlaceAttributor};
    pub use mobility_summary::{
        run_batch, summarize, summarize_both, FailurePolicy, Summary, SummaryConfig,
        SummaryTable, VisitLog, WindowAssembler,
    };
    pub use mobility_window::{Resolution, SegmentClipper, WindowPlanner};

    #[cfg(feature = "polars")]
    pub use mobility_polars::{SummaryDataFrameExt, SummaryFrameExt};
}
