//! Dwell-time attribution to place-of-interest categories
//!
//! Pauses away from home are clustered with a fixed-centroid proximity rule.
//! Each cluster's dwell goes to the first requested category with a geometry
//! matching its centroid, or to the trailing "other" bucket. Independently,
//! clusters with a long enough dwell record the tags of every matching
//! geometry for the visit log.

use crate::geometry::{GeometryIndex, Tags};
use mobility_core::{cluster_pauses, ClusterRule, Coordinate, Segment};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Visit-log dwell threshold used when none is configured
pub const DEFAULT_LOG_THRESHOLD_MIN: f64 = 60.0;

/// Distances and thresholds of place attribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributionParams {
    /// Cluster merge radius, also the radius around home whose pauses are ignored
    pub place_cluster_radius_m: f64,
    /// A point geometry matches when closer than this
    pub poi_match_radius_m: f64,
    /// Clusters with at least this many minutes enter the visit log
    pub log_threshold_min: Option<f64>,
}

impl Default for AttributionParams {
    fn default() -> Self {
        Self {
            place_cluster_radius_m: 5.0,
            poi_match_radius_m: 7.5,
            log_threshold_min: None,
        }
    }
}

/// Result of attributing one window's pauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceAttribution {
    /// Hours per requested category followed by "other"; empty when no
    /// categories were requested
    pub hours: Vec<f64>,
    /// Tags of the geometries matched by long-dwell clusters
    pub visits: Vec<Tags>,
}

/// Attributes the pauses of a window to places of interest
#[derive(Debug, Clone)]
pub struct PlaceAttributor<'a> {
    index: &'a GeometryIndex,
    categories: Option<Vec<String>>,
    save_log: bool,
    log_threshold_min: f64,
    params: AttributionParams,
}

impl<'a> PlaceAttributor<'a> {
    /// `categories` are in attribution priority order.
    ///
    /// When the visit log is on and no threshold is configured, the default
    /// is announced once here.
    pub fn new(
        index: &'a GeometryIndex,
        categories: Option<Vec<String>>,
        save_log: bool,
        params: AttributionParams,
    ) -> Self {
        let log_threshold_min = match params.log_threshold_min {
            Some(threshold) => threshold,
            None => {
                if save_log {
                    info!(
                        threshold_min = DEFAULT_LOG_THRESHOLD_MIN,
                        "visit-log threshold unset, using the default"
                    );
                }
                DEFAULT_LOG_THRESHOLD_MIN
            }
        };
        Self {
            index,
            categories,
            save_log,
            log_threshold_min,
            params,
        }
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    pub fn log_threshold_min(&self) -> f64 {
        self.log_threshold_min
    }

    pub fn attribute(&self, segments: &[Segment], home: &Coordinate) -> PlaceAttribution {
        let rule = ClusterRule::places(self.params.place_cluster_radius_m, *home);
        let clusters = cluster_pauses(segments, &rule);

        let mut hours = match &self.categories {
            Some(c) => vec![0.0; c.len() + 1],
            None => Vec::new(),
        };
        let mut visits = Vec::new();

        for cluster in &clusters {
            if let Some(categories) = &self.categories {
                let slot = self
                    .first_matching_category(categories, &cluster.centroid)
                    .unwrap_or(categories.len());
                hours[slot] += cluster.accumulated_minutes / 60.0;
            }

            if self.save_log && cluster.accumulated_minutes >= self.log_threshold_min {
                visits.extend(
                    self.index
                        .iter()
                        .filter(|(_, g, _)| {
                            g.contains_or_near(&cluster.centroid, self.params.poi_match_radius_m)
                        })
                        .map(|(_, _, tags)| tags.clone()),
                );
            }
        }

        PlaceAttribution { hours, visits }
    }

    fn first_matching_category(&self, categories: &[String], at: &Coordinate) -> Option<usize> {
        categories.iter().position(|category| {
            self.index
                .category(category)
                .any(|(_, g)| g.contains_or_near(at, self.params.poi_match_radius_m))
        })
    }
}
