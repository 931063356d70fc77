//! Overpass query text for the places around a trajectory's pauses
//!
//! Only builds the query. Sending it and retrying is the caller's business.

use mobility_core::{min_distance, BoundingBox, Coordinate, Trajectory};

/// Pauses closer than this to an already collected anchor add no new box
pub const ANCHOR_SEPARATION_M: f64 = 1000.0;

/// Half side length of the box queried around each anchor
pub const QUERY_HALF_SIDE_M: f64 = 1000.0;

/// Pause locations more than [`ANCHOR_SEPARATION_M`] from every earlier
/// anchor, in trajectory order
pub fn query_anchors(traj: &Trajectory) -> Vec<Coordinate> {
    let mut anchors: Vec<Coordinate> = Vec::new();
    for pause in traj.pauses() {
        let at = pause.start.coord;
        match min_distance(&at, anchors.iter()) {
            Some(d) if d <= ANCHOR_SEPARATION_M => {}
            _ => anchors.push(at),
        }
    }
    anchors
}

/// Overpass QL selecting every `leisure` and `amenity` node and way near the
/// trajectory's pauses, with geometry output.
pub fn overpass_query(traj: &Trajectory) -> String {
    let mut query = String::from("[out:json];\n(");
    for anchor in query_anchors(traj) {
        let b = BoundingBox::around(&anchor, QUERY_HALF_SIDE_M);
        let bbox = format!("({}, {}, {}, {})", b.south, b.west, b.north, b.east);
        for key in ["leisure", "amenity"] {
            for kind in ["node", "way"] {
                query.push_str(&format!("\n\t{kind}{bbox}['{key}'];"));
            }
        }
    }
    query.push_str("\n);\nout geom qt;");
    query
}
