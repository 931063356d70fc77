//! Hourly and daily mobility summaries
//!
//! The [`WindowAssembler`] walks every planned window of a trajectory,
//! clips the segments to it, computes the window's features and optional
//! place attribution, and collects the rows into a [`SummaryTable`] together
//! with a [`VisitLogMap`]. With day/night splitting, the two rows of each
//! date are merged into one wide row.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use mobility_core::{Coordinate, Segment, Trajectory};
//! use mobility_summary::{summarize, SummaryConfig};
//!
//! let home = Coordinate::new(0.0, 0.0);
//! let traj = Trajectory::new(vec![Segment::pause(home, 0.0, 6.0 * 3600.0, true)])?;
//!
//! let summary = summarize(&traj, &home, Utc, &SummaryConfig::hourly(), None)?;
//! assert_eq!(summary.table.len(), 5);
//! assert_eq!(summary.table.get(2, "home_time"), Some(60.0));
//! # Ok::<(), mobility_core::Error>(())
//! ```

pub mod assembler;
pub mod batch;
pub mod config;
pub mod log;
pub mod row;
pub mod schema;
pub mod table;

pub use assembler::{summarize, summarize_both, Summary, WindowAssembler, WindowReport};
pub use batch::{run_batch, BatchOutcome, BatchReport, FailurePolicy};
pub use config::SummaryConfig;
pub use log::{VisitLog, VisitLogMap};
pub use row::FeatureRow;
pub use table::SummaryTable;
