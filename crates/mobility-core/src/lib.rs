//! Core types and primitives for windowed mobility statistics
//!
//! This crate provides the foundation shared by the windowing, metrics and
//! place-attribution crates:
//!
//! 1. **Trajectory model** - [`Segment`]s of flight/pause with observed or
//!    imputed provenance, validated into a [`Trajectory`]
//! 2. **Geodesy** - great-circle distances and bounding boxes
//! 3. **Reductions** - mean/standard deviation that fall back to zero on
//!    empty input
//! 4. **Clustering** - order-dependent greedy proximity clustering of pauses
//!
//! # Example
//!
//! ```rust
//! use mobility_core::{Segment, TimedPoint, Trajectory};
//!
//! let traj = Trajectory::new(vec![Segment::flight(
//!     TimedPoint::new(0.0, 0.0, 0.0),
//!     TimedPoint::new(0.0, 0.01, 600.0),
//!     true,
//! )])?;
//! assert_eq!(traj.end_time(), 600.0);
//! # Ok::<(), mobility_core::Error>(())
//! ```

pub mod cluster;
pub mod error;
pub mod geodesy;
pub mod stats;
pub mod types;

// Re-export core types
pub use error::{Error, Result};

pub use cluster::{cluster_pauses, CentroidUpdate, ClusterRule, Exclusion, PlaceCluster};
pub use geodesy::{great_circle_distance, max_pairwise_distance, min_distance, BoundingBox};
pub use stats::{mean_or_zero, std_or_zero, weighted_mean, Moments};
pub use types::{Coordinate, Segment, SegmentStatus, TimedPoint, Trajectory};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Coordinate, Error, Result, Segment, SegmentStatus, TimedPoint, Trajectory,
    };
}
