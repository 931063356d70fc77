//! Per-window mobility features
//!
//! [`MetricsComputer`] turns the clipped segments of one window into a
//! [`WindowMetrics`]: observed duration, home time, distance travelled,
//! flight and pause moments, and at daily resolution the radius of gyration,
//! diameter, significant places and their entropy.

pub mod entropy;
pub mod metrics;

pub use entropy::{dwell_entropy, significant_places, SignificantPlaces};
pub use metrics::{DailyMetrics, MetricsComputer, MetricsParams, WindowMetrics};
