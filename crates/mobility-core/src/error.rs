//! Error types for mobility statistics
//!
//! Provides a unified error type for all mobility-stats crates. Anomalies that
//! are recovered inside a window (zero-duration clip boundaries, degenerate
//! windows) are reported as data, not through this type.

use thiserror::Error;

/// Core error type for mobility statistics operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A trajectory needs at least one segment
    #[error("Trajectory is empty")]
    EmptyTrajectory,

    /// Segment start times must be non-decreasing
    #[error("Segment {index} starts before its predecessor")]
    UnorderedSegments { index: usize },

    /// A single segment violates its own invariants
    #[error("Invalid segment {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },

    /// A place geometry that is neither a point nor a polygon
    #[error("Malformed geometry {id}: {vertices} vertices is neither a point nor a polygon")]
    MalformedGeometry { id: i64, vertices: usize },

    /// JSON decoding error (config files, provider responses)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a parameter that must be finite and non-negative
    pub fn negative_parameter(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be finite and >= 0, got {value}"))
    }

    /// Create an error for a segment holding NaN/Inf values
    pub fn non_finite(index: usize) -> Self {
        Self::InvalidSegment {
            index,
            reason: "contains NaN or infinite values".to_string(),
        }
    }
}
