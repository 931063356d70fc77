//! Window-by-window assembly of the summary table and visit log

use crate::config::SummaryConfig;
use crate::log::{VisitLog, VisitLogMap};
use crate::row::FeatureRow;
use crate::schema;
use crate::table::SummaryTable;
use chrono::TimeZone;
use mobility_core::{Coordinate, Result, Trajectory};
use mobility_metrics::MetricsComputer;
use mobility_places::{GeometryIndex, PlaceAttributor};
use mobility_window::{ClipAnomaly, DayPart, Resolution, SegmentClipper, WindowPlanner};
use tracing::{debug, instrument};

/// What happened in one window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    /// Visit-log key of the window
    pub key: String,
    pub start_t: i64,
    pub end_t: i64,
    pub part: DayPart,
    /// Number of clipped segments
    pub segments: usize,
    /// No observed data; the row is NaN
    pub degenerate: bool,
    pub anomalies: Vec<ClipAnomaly>,
}

/// Output of one summary run
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub resolution: Resolution,
    pub table: SummaryTable,
    pub log: VisitLogMap,
    /// One report per window, before any day/night merge
    pub windows: Vec<WindowReport>,
}

impl Summary {
    /// Clip anomalies of every window, keyed by window
    pub fn anomalies(&self) -> impl Iterator<Item = (&str, &ClipAnomaly)> {
        self.windows
            .iter()
            .flat_map(|w| w.anomalies.iter().map(move |a| (w.key.as_str(), a)))
    }
}

/// Drives planning, clipping, metrics and place attribution over all
/// windows of a trajectory
#[derive(Debug, Clone)]
pub struct WindowAssembler<'a, Tz: TimeZone> {
    tz: Tz,
    config: SummaryConfig,
    places: Option<&'a GeometryIndex>,
}

impl<'a, Tz: TimeZone> WindowAssembler<'a, Tz> {
    pub fn new(tz: Tz, config: SummaryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tz,
            config,
            places: None,
        })
    }

    /// Geometries for place attribution and the visit log.
    ///
    /// Without them every attributed hour lands in "other".
    pub fn with_places(mut self, places: &'a GeometryIndex) -> Self {
        self.places = Some(places);
        self
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Column list of the table this assembler produces
    pub fn columns(&self) -> Vec<String> {
        let cols = schema::columns(
            self.config.resolution,
            self.config.places_of_interest.as_deref(),
        );
        if self.config.effective_split() {
            schema::merged_columns(&cols)
        } else {
            cols
        }
    }

    /// Summarize `traj` relative to `home`.
    ///
    /// A trajectory too short for a single window yields an empty table with
    /// the full column list.
    #[instrument(
        skip_all,
        fields(resolution = self.config.resolution.name(), segments = traj.len())
    )]
    pub fn summarize(&self, traj: &Trajectory, home: &Coordinate) -> Result<Summary> {
        let resolution = self.config.resolution;
        let split = self.config.effective_split();
        let categories = self.config.places_of_interest.clone();
        let place_columns = categories.as_ref().map_or(0, |c| c.len() + 1);

        let plan = WindowPlanner::new(self.tz.clone(), resolution, split).plan(traj);
        let clipper = SegmentClipper::new();
        let computer =
            MetricsComputer::with_params(self.tz.clone(), resolution, self.config.metrics_params());

        let empty = GeometryIndex::new();
        let attributor = self.config.uses_places().then(|| {
            PlaceAttributor::new(
                self.places.unwrap_or(&empty),
                categories.clone(),
                self.config.save_log,
                self.config.attribution_params(),
            )
        });

        let mut table = SummaryTable::new(schema::columns(resolution, categories.as_deref()));
        let mut log = VisitLogMap::new();
        let mut windows = Vec::with_capacity(plan.len());

        for window in plan.iter() {
            let clipped = clipper.clip(traj, window);
            let metrics = computer.compute(&clipped, home);
            let key = window.log_key();
            let degenerate = metrics.is_degenerate();
            debug!(window = %key, segments = clipped.len(), degenerate, "summarized window");

            let (row, entry) = if degenerate {
                (
                    FeatureRow::degenerate(window.label, window.part, resolution, place_columns),
                    VisitLog::Missing,
                )
            } else {
                let attribution = attributor
                    .as_ref()
                    .map(|a| a.attribute(clipped.segments(), home))
                    .unwrap_or_default();
                (
                    FeatureRow::from_metrics(
                        window.label,
                        window.part,
                        resolution,
                        &metrics,
                        &attribution.hours,
                    ),
                    VisitLog::Visits(attribution.visits),
                )
            };

            table.push_row(row.to_cells(resolution))?;
            log.insert(key.clone(), entry);
            windows.push(WindowReport {
                key,
                start_t: window.start_t,
                end_t: window.end_t,
                part: window.part,
                segments: clipped.len(),
                degenerate,
                anomalies: clipped.anomalies().to_vec(),
            });
        }

        if split {
            table = table.merge_day_night();
        }

        Ok(Summary {
            resolution,
            table,
            log,
            windows,
        })
    }
}

/// Summarize `traj` with `config` in timezone `tz`
pub fn summarize<Tz: TimeZone>(
    traj: &Trajectory,
    home: &Coordinate,
    tz: Tz,
    config: &SummaryConfig,
    places: Option<&GeometryIndex>,
) -> Result<Summary> {
    let assembler = WindowAssembler::new(tz, config.clone())?;
    match places {
        Some(index) => assembler.with_places(index).summarize(traj, home),
        None => assembler.summarize(traj, home),
    }
}

/// Hourly and daily summaries of the same trajectory.
///
/// `config.resolution` is overridden; day/night splitting applies to the
/// daily summary only.
#[instrument(skip_all, fields(segments = traj.len()))]
pub fn summarize_both<Tz: TimeZone>(
    traj: &Trajectory,
    home: &Coordinate,
    tz: Tz,
    config: &SummaryConfig,
    places: Option<&GeometryIndex>,
) -> Result<(Summary, Summary)> {
    let hourly = config.clone().with_resolution(Resolution::Hourly);
    let daily = config.clone().with_resolution(Resolution::Daily);
    Ok((
        summarize(traj, home, tz.clone(), &hourly, places)?,
        summarize(traj, home, tz, &daily, places)?,
    ))
}
