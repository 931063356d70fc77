//! Greedy proximity clustering of pause locations
//!
//! Pauses are visited in segment order. The first pause seeds a cluster; each
//! later pause joins the nearest existing cluster when that cluster's
//! centroid lies within the merge radius, and otherwise seeds a new one. The
//! result therefore depends on input order, which callers must preserve.

use crate::geodesy::great_circle_distance;
use crate::types::{Coordinate, Segment};

/// How a cluster's centroid evolves as pauses join it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentroidUpdate {
    /// The seeding pause stays the centroid
    Fixed,
    /// The centroid is the running mean of member locations
    RunningMean,
}

/// Parameters of one clustering pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterRule {
    /// A pause joins a cluster when within this many meters of its centroid
    pub merge_radius_m: f64,
    pub centroid: CentroidUpdate,
    /// Pauses within `radius` meters of `center` are left out entirely
    pub exclusion: Option<Exclusion>,
}

/// A disc of locations to ignore, typically around home
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exclusion {
    pub center: Coordinate,
    pub radius_m: f64,
}

impl ClusterRule {
    /// Fixed-centroid rule used for place attribution
    pub fn places(merge_radius_m: f64, home: Coordinate) -> Self {
        Self {
            merge_radius_m,
            centroid: CentroidUpdate::Fixed,
            exclusion: Some(Exclusion {
                center: home,
                radius_m: merge_radius_m,
            }),
        }
    }

    /// Running-mean rule used for significant places, home included
    pub fn significant_places(merge_radius_m: f64) -> Self {
        Self {
            merge_radius_m,
            centroid: CentroidUpdate::RunningMean,
            exclusion: None,
        }
    }
}

/// A group of nearby pauses with their total dwell time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceCluster {
    pub centroid: Coordinate,
    pub accumulated_minutes: f64,
    pub members: usize,
}

impl PlaceCluster {
    fn seed(at: Coordinate, minutes: f64) -> Self {
        Self {
            centroid: at,
            accumulated_minutes: minutes,
            members: 1,
        }
    }

    fn absorb(&mut self, at: Coordinate, minutes: f64, update: CentroidUpdate) {
        if update == CentroidUpdate::RunningMean {
            let n = self.members as f64;
            self.centroid = Coordinate::new(
                (self.centroid.lat * n + at.lat) / (n + 1.0),
                (self.centroid.lon * n + at.lon) / (n + 1.0),
            );
        }
        self.members += 1;
        self.accumulated_minutes += minutes;
    }
}

/// Cluster the pause segments among `segments`, in order.
///
/// Each pause is located at its start point and contributes its duration in
/// minutes. Flights are ignored.
pub fn cluster_pauses<'a, I>(segments: I, rule: &ClusterRule) -> Vec<PlaceCluster>
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut clusters: Vec<PlaceCluster> = Vec::new();

    for seg in segments.into_iter().filter(|s| s.is_pause()) {
        let at = seg.start.coord;
        if let Some(ex) = &rule.exclusion {
            if great_circle_distance(&at, &ex.center) <= ex.radius_m {
                continue;
            }
        }
        let minutes = seg.duration() / 60.0;

        let nearest = clusters
            .iter()
            .enumerate()
            .map(|(i, c)| (i, great_circle_distance(&at, &c.centroid)))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            });

        match nearest {
            Some((i, d)) if d <= rule.merge_radius_m => {
                clusters[i].absorb(at, minutes, rule.centroid)
            }
            _ => clusters.push(PlaceCluster::seed(at, minutes)),
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Roughly 1.1 m per 1e-5 degree at the equator.
    fn pause_at(lon: f64, t0: f64, minutes: f64) -> Segment {
        Segment::pause(Coordinate::new(0.0, lon), t0, t0 + minutes * 60.0, true)
    }

    #[test]
    fn test_nearby_pauses_merge() {
        let segs = [pause_at(0.001, 0.0, 10.0), pause_at(0.00102, 600.0, 20.0)];
        let rule = ClusterRule::places(5.0, Coordinate::new(0.0, 0.0));
        let clusters = cluster_pauses(&segs, &rule);
        assert_eq!(clusters.len(), 1);
        assert_relative_eq!(clusters[0].accumulated_minutes, 30.0);
        assert_eq!(clusters[0].members, 2);
        assert_eq!(clusters[0].centroid, Coordinate::new(0.0, 0.001));
    }

    #[test]
    fn test_distant_pauses_split() {
        let segs = [pause_at(0.001, 0.0, 10.0), pause_at(0.002, 600.0, 20.0)];
        let rule = ClusterRule::places(5.0, Coordinate::new(0.0, 0.0));
        assert_eq!(cluster_pauses(&segs, &rule).len(), 2);
    }

    #[test]
    fn test_home_pauses_excluded() {
        let segs = [pause_at(0.0, 0.0, 10.0), pause_at(0.00002, 600.0, 5.0)];
        let rule = ClusterRule::places(5.0, Coordinate::new(0.0, 0.0));
        assert!(cluster_pauses(&segs, &rule).is_empty());
    }

    #[test]
    fn test_joins_nearest_cluster_only() {
        // Seeds 7.8 m apart; the third pause is 4.4 m from the first and
        // 3.3 m from the second, so it must go to the second.
        let segs = [
            pause_at(0.001, 0.0, 10.0),
            pause_at(0.00107, 600.0, 10.0),
            pause_at(0.00104, 1200.0, 7.0),
        ];
        let rule = ClusterRule::places(5.0, Coordinate::new(0.0, 0.0));
        let clusters = cluster_pauses(&segs, &rule);
        assert_eq!(clusters.len(), 2);
        assert_relative_eq!(clusters[0].accumulated_minutes, 10.0);
        assert_relative_eq!(clusters[1].accumulated_minutes, 17.0);
    }

    #[test]
    fn test_running_mean_centroid() {
        let segs = [pause_at(0.0, 0.0, 10.0), pause_at(0.0002, 600.0, 10.0)];
        let clusters = cluster_pauses(&segs, &ClusterRule::significant_places(50.0));
        assert_eq!(clusters.len(), 1);
        assert_relative_eq!(clusters[0].centroid.lon, 0.0001);
    }

    #[test]
    fn test_flights_are_ignored() {
        let flight = Segment::flight(
            crate::types::TimedPoint::new(0.0, 0.01, 0.0),
            crate::types::TimedPoint::new(0.0, 0.02, 60.0),
            true,
        );
        let clusters = cluster_pauses(&[flight], &ClusterRule::significant_places(50.0));
        assert!(clusters.is_empty());
    }
}
