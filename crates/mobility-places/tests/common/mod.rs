//! Shared fixtures for integration tests

use mobility_core::{Coordinate, Segment, TimedPoint, Trajectory};

/// A trimmed Overpass `out geom` response: a cafe node, a park way, a
/// two-vertex way, a relation and an untagged node.
pub const OVERPASS_RESPONSE: &str = r#"{
  "version": 0.6,
  "generator": "Overpass API",
  "elements": [
    {
      "type": "node",
      "id": 101,
      "lat": 0.0,
      "lon": 0.01,
      "tags": {"amenity": "cafe", "name": "Bean"}
    },
    {
      "type": "way",
      "id": 202,
      "bounds": {"minlat": 0.019, "minlon": 0.019, "maxlat": 0.021, "maxlon": 0.021},
      "nodes": [1, 2, 3, 4, 1],
      "geometry": [
        {"lat": 0.019, "lon": 0.019},
        {"lat": 0.019, "lon": 0.021},
        {"lat": 0.021, "lon": 0.021},
        {"lat": 0.021, "lon": 0.019},
        {"lat": 0.019, "lon": 0.019}
      ],
      "tags": {"leisure": "park", "name": "Green"}
    },
    {
      "type": "way",
      "id": 303,
      "geometry": [
        {"lat": 0.03, "lon": 0.03},
        {"lat": 0.031, "lon": 0.031}
      ],
      "tags": {"leisure": "track"}
    },
    {
      "type": "relation",
      "id": 404,
      "tags": {"amenity": "school"}
    },
    {
      "type": "node",
      "id": 505,
      "lat": 0.5,
      "lon": 0.5
    }
  ]
}"#;

/// Alternating pauses and flights visiting `stops` for `minutes` each
pub fn tour(stops: &[(f64, f64, f64)]) -> Trajectory {
    let mut segments = Vec::new();
    let mut t = 1_614_556_800.0;
    let mut prev: Option<Coordinate> = None;
    for &(lat, lon, minutes) in stops {
        let here = Coordinate::new(lat, lon);
        if let Some(from) = prev {
            segments.push(Segment::flight(
                TimedPoint { coord: from, t },
                TimedPoint { coord: here, t: t + 300.0 },
                true,
            ));
            t += 300.0;
        }
        segments.push(Segment::pause(here, t, t + minutes * 60.0, true));
        t += minutes * 60.0;
        prev = Some(here);
    }
    Trajectory::new(segments).unwrap()
}
