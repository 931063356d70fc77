//! Great-circle distances on a spherical earth

use crate::types::Coordinate;
use geo::{Distance, Haversine, Point};

/// Mean earth radius in meters, matching the haversine implementation
const EARTH_RADIUS_M: f64 = 6_371_008.8;

fn to_point(c: &Coordinate) -> Point<f64> {
    Point::new(c.lon, c.lat)
}

/// Great-circle (haversine) distance between two coordinates in meters
pub fn great_circle_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    Haversine::distance(to_point(a), to_point(b))
}

/// Smallest distance from `origin` to any of `others`, `None` when empty
pub fn min_distance<'a, I>(origin: &Coordinate, others: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    others
        .into_iter()
        .map(|c| great_circle_distance(origin, c))
        .fold(None, |acc, d| match acc {
            Some(m) if m <= d => Some(m),
            _ => Some(d),
        })
}

/// Largest pairwise distance among `points`; zero for fewer than two points
pub fn max_pairwise_distance(points: &[Coordinate]) -> f64 {
    let mut best = 0.0_f64;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            best = best.max(great_circle_distance(a, b));
        }
    }
    best
}

/// Axis-aligned box around a center point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Box extending `half_side_m` meters from `center` in each direction
    pub fn around(center: &Coordinate, half_side_m: f64) -> Self {
        let dlat = (half_side_m / EARTH_RADIUS_M).to_degrees();
        let parallel_radius = EARTH_RADIUS_M * center.lat.to_radians().cos();
        let dlon = if parallel_radius > 0.0 {
            (half_side_m / parallel_radius).to_degrees()
        } else {
            180.0
        };
        Self {
            south: center.lat - dlat,
            west: center.lon - dlon,
            north: center.lat + dlat,
            east: center.lon + dlon,
        }
    }
}
