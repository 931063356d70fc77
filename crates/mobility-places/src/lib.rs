//! Places of interest for mobility summaries
//!
//! - [`GeometryIndex`]: category and id lookup over point and polygon
//!   geometries, built directly or from an Overpass JSON response
//! - [`overpass_query`]: the query text covering a trajectory's pauses
//! - [`PlaceAttributor`]: per-window dwell hours by category and visit-log tags

pub mod attribution;
pub mod geometry;
pub mod overpass;

pub use attribution::{
    AttributionParams, PlaceAttribution, PlaceAttributor, DEFAULT_LOG_THRESHOLD_MIN,
};
pub use geometry::{GeometryId, GeometryIndex, PlaceGeometry, Tags};
pub use overpass::{overpass_query, query_anchors, ANCHOR_SEPARATION_M, QUERY_HALF_SIDE_M};
