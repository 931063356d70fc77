//! Daily and hourly summaries of a two-day trajectory with place attribution
//!
//! Run with `RUST_LOG=debug cargo run --example daily_summary` to see the
//! per-window trace.

use anyhow::Result;
use chrono::FixedOffset;
use mobility_stats::prelude::*;
use mobility_stats::overpass_query;
use tracing_subscriber::EnvFilter;

/// Provider response the index is built from; normally fetched with the
/// query printed below.
const PLACES_JSON: &str = r#"{
  "elements": [
    {"type": "node", "id": 1, "lat": 51.5200, "lon": -0.0800,
     "tags": {"amenity": "cafe", "name": "Corner Cafe"}},
    {"type": "way", "id": 2,
     "geometry": [
       {"lat": 51.509, "lon": -0.101}, {"lat": 51.509, "lon": -0.099},
       {"lat": 51.511, "lon": -0.099}, {"lat": 51.511, "lon": -0.101},
       {"lat": 51.509, "lon": -0.101}
     ],
     "tags": {"leisure": "park", "name": "Riverside"}}
  ]
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let home = Coordinate::new(51.50, -0.12);
    let cafe = Coordinate::new(51.52, -0.08);
    let park = Coordinate::new(51.51, -0.10);

    let mut segments = Vec::new();
    for day in 0..2 {
        let t0 = 1_614_556_800.0 + day as f64 * 86_400.0;
        let h = |hours: f64| t0 + hours * 3600.0;
        segments.push(Segment::pause(home, t0, h(9.0), true));
        segments.push(Segment::flight(
            TimedPoint { coord: home, t: h(9.0) },
            TimedPoint { coord: cafe, t: h(9.5) },
            true,
        ));
        segments.push(Segment::pause(cafe, h(9.5), h(11.0), true));
        segments.push(Segment::flight(
            TimedPoint { coord: cafe, t: h(11.0) },
            TimedPoint { coord: park, t: h(11.5) },
            day == 0,
        ));
        segments.push(Segment::pause(park, h(11.5), h(14.0), true));
        segments.push(Segment::flight(
            TimedPoint { coord: park, t: h(14.0) },
            TimedPoint { coord: home, t: h(14.5) },
            true,
        ));
        segments.push(Segment::pause(home, h(14.5), h(24.0) - 1.0, true));
    }
    let traj = Trajectory::new(segments)?;

    println!("Overpass query:\n{}\n", overpass_query(&traj));

    let places = GeometryIndex::from_overpass_json(PLACES_JSON)?;
    let config = SummaryConfig::daily()
        .with_places_of_interest(["cafe", "park"])
        .with_save_log(true)
        .with_log_threshold(30.0);
    let tz = FixedOffset::east_opt(0).ok_or_else(|| anyhow::anyhow!("bad offset"))?;

    let (hourly, daily) = summarize_both(&traj, &home, tz, &config, Some(&places))?;

    println!("Daily summary:");
    print_table(&daily.table);
    println!("\nVisit log:\n{}", daily.log.to_json()?);

    println!(
        "\nHourly summary: {} windows, {} observed",
        hourly.table.len(),
        hourly
            .table
            .column("obs_duration")
            .unwrap_or_default()
            .iter()
            .filter(|v| !v.is_nan())
            .count()
    );
    for (window, anomaly) in hourly.anomalies() {
        println!("  {window}: {anomaly:?}");
    }

    Ok(())
}

fn print_table(table: &SummaryTable) {
    for (i, row) in table.rows().iter().enumerate() {
        println!("  row {i}:");
        for (name, value) in table.columns().iter().zip(row) {
            println!("    {name:<24} {value:>10.3}");
        }
    }
}
