//! Summary configuration

use mobility_core::{Error, Result};
use mobility_metrics::MetricsParams;
use mobility_places::AttributionParams;
use mobility_window::Resolution;
use serde::{Deserialize, Serialize};

/// Options of one summary run.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub resolution: Resolution,

    /// Split each day into day and night windows (daily resolution only)
    pub split_day_night: bool,

    /// Place categories in attribution priority order
    pub places_of_interest: Option<Vec<String>>,

    /// Record the tags of places visited in each window
    pub save_log: bool,

    /// Minimum cluster dwell for the visit log, minutes
    pub log_threshold_min: Option<f64>,

    pub home_radius_m: f64,
    pub place_cluster_radius_m: f64,
    pub poi_match_radius_m: f64,
    pub sig_place_radius_m: f64,
    pub sig_place_min_dwell_min: f64,
    pub entropy_epsilon: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        let metrics = MetricsParams::default();
        let places = AttributionParams::default();
        Self {
            resolution: Resolution::Daily,
            split_day_night: false,
            places_of_interest: None,
            save_log: false,
            log_threshold_min: None,
            home_radius_m: metrics.home_radius_m,
            place_cluster_radius_m: places.place_cluster_radius_m,
            poi_match_radius_m: places.poi_match_radius_m,
            sig_place_radius_m: metrics.sig_place_radius_m,
            sig_place_min_dwell_min: metrics.sig_place_min_dwell_min,
            entropy_epsilon: metrics.entropy_epsilon,
        }
    }
}

impl SummaryConfig {
    pub fn hourly() -> Self {
        Self::default().with_resolution(Resolution::Hourly)
    }

    pub fn daily() -> Self {
        Self::default()
    }

    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_split_day_night(mut self, split: bool) -> Self {
        self.split_day_night = split;
        self
    }

    pub fn with_places_of_interest<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.places_of_interest = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_save_log(mut self, save_log: bool) -> Self {
        self.save_log = save_log;
        self
    }

    pub fn with_log_threshold(mut self, minutes: f64) -> Self {
        self.log_threshold_min = Some(minutes);
        self
    }

    pub fn with_home_radius(mut self, meters: f64) -> Self {
        self.home_radius_m = meters;
        self
    }

    /// Whether day/night splitting applies at the configured resolution
    pub fn effective_split(&self) -> bool {
        self.split_day_night && self.resolution == Resolution::Daily
    }

    /// Whether any place attribution or visit logging is requested
    pub fn uses_places(&self) -> bool {
        self.places_of_interest.is_some() || self.save_log
    }

    /// Check that every distance, duration and constant is finite and
    /// non-negative, and that category names are unique.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("home_radius_m", self.home_radius_m),
            ("place_cluster_radius_m", self.place_cluster_radius_m),
            ("poi_match_radius_m", self.poi_match_radius_m),
            ("sig_place_radius_m", self.sig_place_radius_m),
            ("sig_place_min_dwell_min", self.sig_place_min_dwell_min),
            ("entropy_epsilon", self.entropy_epsilon),
            ("log_threshold_min", self.log_threshold_min.unwrap_or(0.0)),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::negative_parameter(name, value));
            }
        }

        if let Some(categories) = &self.places_of_interest {
            for (i, category) in categories.iter().enumerate() {
                if category == "other" || categories[..i].contains(category) {
                    return Err(Error::InvalidParameter(format!(
                        "place category {category:?} is reserved or repeated"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn metrics_params(&self) -> MetricsParams {
        MetricsParams {
            home_radius_m: self.home_radius_m,
            sig_place_radius_m: self.sig_place_radius_m,
            sig_place_min_dwell_min: self.sig_place_min_dwell_min,
            entropy_epsilon: self.entropy_epsilon,
            ..MetricsParams::default()
        }
    }

    pub fn attribution_params(&self) -> AttributionParams {
        AttributionParams {
            place_cluster_radius_m: self.place_cluster_radius_m,
            poi_match_radius_m: self.poi_match_radius_m,
            log_threshold_min: self.log_threshold_min,
        }
    }
}
