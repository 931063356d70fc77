//! Significant places and their visit entropy

use mobility_core::{cluster_pauses, ClusterRule, Segment};

/// Significant-place summary of one window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignificantPlaces {
    /// Clusters whose dwell exceeds the cutoff
    pub count: usize,
    /// Shannon entropy of the dwell distribution over those clusters
    pub entropy: f64,
}

/// Cluster the pauses in `segments` and summarize the clusters holding more
/// than `min_dwell_min` minutes.
pub fn significant_places(
    segments: &[Segment],
    merge_radius_m: f64,
    min_dwell_min: f64,
    epsilon: f64,
) -> SignificantPlaces {
    let dwell: Vec<f64> = cluster_pauses(segments, &ClusterRule::significant_places(merge_radius_m))
        .into_iter()
        .map(|c| c.accumulated_minutes)
        .filter(|&minutes| minutes > min_dwell_min)
        .collect();

    SignificantPlaces {
        count: dwell.len(),
        entropy: dwell_entropy(&dwell, epsilon),
    }
}

/// `-sum(p * ln(p + epsilon))` over dwell times normalized to probabilities.
///
/// Zero for no places or a single place, and never negative.
pub fn dwell_entropy(dwell: &[f64], epsilon: f64) -> f64 {
    if dwell.len() < 2 {
        return 0.0;
    }
    let total: f64 = dwell.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let h: f64 = dwell
        .iter()
        .map(|t| t / total)
        .map(|p| -p * (p + epsilon).ln())
        .sum();
    h.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mobility_core::Coordinate;

    fn pause(lon: f64, t0: f64, minutes: f64) -> Segment {
        Segment::pause(Coordinate::new(0.0, lon), t0, t0 + minutes * 60.0, true)
    }

    #[test]
    fn test_single_place_has_zero_entropy() {
        assert_eq!(dwell_entropy(&[120.0], 1e-5), 0.0);
        assert_eq!(dwell_entropy(&[], 1e-5), 0.0);
    }

    #[test]
    fn test_two_equal_places_approach_ln2() {
        let h = dwell_entropy(&[60.0, 60.0], 1e-5);
        assert_abs_diff_eq!(h, std::f64::consts::LN_2, epsilon = 1e-4);
    }

    #[test]
    fn test_short_visits_are_not_significant() {
        let segs = [
            pause(0.0, 0.0, 30.0),
            pause(0.01, 3600.0, 10.0),
            pause(0.0001, 7200.0, 20.0),
        ];
        let places = significant_places(&segs, 50.0, 15.0, 1e-5);
        // First and third merge (11 m apart) into 50 min; the 10 min stop is dropped.
        assert_eq!(places.count, 1);
        assert_eq!(places.entropy, 0.0);
    }

    #[test]
    fn test_cutoff_is_strict() {
        let segs = [pause(0.0, 0.0, 15.0), pause(0.01, 3600.0, 16.0)];
        let places = significant_places(&segs, 50.0, 15.0, 1e-5);
        assert_eq!(places.count, 1);
    }
}
