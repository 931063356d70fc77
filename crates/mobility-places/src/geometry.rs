//! Place-of-interest geometries and their lookup index

use geo::{Contains, Coord, LineString, Point, Polygon};
use mobility_core::{great_circle_distance, Coordinate, Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Provider-assigned identifier of a geometry
pub type GeometryId = i64;

/// Key/value tags attached to a geometry
pub type Tags = BTreeMap<String, String>;

/// A place outline, decided by vertex count
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceGeometry {
    /// A single vertex; matched by proximity
    Point(Coordinate),
    /// Three or more vertices; matched by containment
    Polygon(Polygon<f64>),
}

impl PlaceGeometry {
    /// Build a geometry from its vertex list.
    ///
    /// One vertex is a point, three or more a polygon boundary. Anything else
    /// is rejected as [`Error::MalformedGeometry`].
    pub fn from_vertices(id: GeometryId, vertices: &[Coordinate]) -> Result<Self> {
        match vertices {
            [single] => Ok(Self::Point(*single)),
            _ if vertices.len() >= 3 => {
                let ring: Vec<Coord<f64>> = vertices
                    .iter()
                    .map(|c| Coord { x: c.lon, y: c.lat })
                    .collect();
                Ok(Self::Polygon(Polygon::new(LineString::new(ring), vec![])))
            }
            _ => Err(Error::MalformedGeometry {
                id,
                vertices: vertices.len(),
            }),
        }
    }

    /// Whether `at` lies strictly inside a polygon, or closer than
    /// `radius_m` meters to a point.
    pub fn contains_or_near(&self, at: &Coordinate, radius_m: f64) -> bool {
        match self {
            Self::Point(p) => great_circle_distance(p, at) < radius_m,
            Self::Polygon(poly) => poly.contains(&Point::new(at.lon, at.lat)),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: GeometryId,
    geometry: PlaceGeometry,
    tags: Tags,
}

/// Lookup of place geometries by category and id.
///
/// Geometries keep their insertion order, which fixes the order of matched
/// tags in the visit log.
#[derive(Debug, Clone, Default)]
pub struct GeometryIndex {
    entries: Vec<Entry>,
    positions: HashMap<GeometryId, usize>,
    categories: HashMap<String, Vec<GeometryId>>,
    skipped: usize,
}

impl GeometryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a geometry under an optional category.
    ///
    /// Re-inserting a known id replaces its geometry and tags.
    pub fn insert(
        &mut self,
        id: GeometryId,
        category: Option<&str>,
        vertices: &[Coordinate],
        tags: Tags,
    ) -> Result<()> {
        let geometry = PlaceGeometry::from_vertices(id, vertices)?;
        let entry = Entry { id, geometry, tags };

        match self.positions.get(&id) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.positions.insert(id, self.entries.len());
                self.entries.push(entry);
            }
        }

        if let Some(category) = category {
            let ids = self.categories.entry(category.to_string()).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(())
    }

    /// Like [`insert`](Self::insert), but malformed geometries are counted
    /// and left out instead of failing.
    pub fn insert_or_skip(
        &mut self,
        id: GeometryId,
        category: Option<&str>,
        vertices: &[Coordinate],
        tags: Tags,
    ) {
        if let Err(err) = self.insert(id, category, vertices, tags) {
            warn!(id, %err, "skipping place geometry");
            self.skipped += 1;
        }
    }

    /// Parse an Overpass `[out:json]` response with `out geom` output.
    ///
    /// Nodes become points and ways take their geometry vertex list. The
    /// category is the `amenity` tag, else the `leisure` tag. Other element
    /// types are ignored.
    pub fn from_overpass_json(json: &str) -> Result<Self> {
        let response: OverpassResponse = serde_json::from_str(json)?;
        let mut index = Self::new();

        for element in response.elements {
            let vertices: Vec<Coordinate> = match element.kind.as_str() {
                "node" => match (element.lat, element.lon) {
                    (Some(lat), Some(lon)) => vec![Coordinate::new(lat, lon)],
                    _ => Vec::new(),
                },
                "way" => element
                    .geometry
                    .iter()
                    .map(|v| Coordinate::new(v.lat, v.lon))
                    .collect(),
                _ => continue,
            };
            let category = element
                .tags
                .get("amenity")
                .or_else(|| element.tags.get("leisure"))
                .cloned();
            index.insert_or_skip(element.id, category.as_deref(), &vertices, element.tags);
        }

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of geometries left out as malformed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&PlaceGeometry> {
        self.positions.get(&id).map(|&pos| &self.entries[pos].geometry)
    }

    pub fn tags(&self, id: GeometryId) -> Option<&Tags> {
        self.positions.get(&id).map(|&pos| &self.entries[pos].tags)
    }

    /// Geometries tagged with `category`, in insertion order
    pub fn category<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = (GeometryId, &'a PlaceGeometry)> + 'a {
        self.categories
            .get(category)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&id| self.geometry(id).map(|g| (id, g)))
    }

    /// All geometries with their tags, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (GeometryId, &PlaceGeometry, &Tags)> {
        self.entries.iter().map(|e| (e.id, &e.geometry, &e.tags))
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: GeometryId,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    geometry: Vec<OverpassVertex>,
    #[serde(default)]
    tags: Tags,
}

#[derive(Debug, Deserialize)]
struct OverpassVertex {
    lat: f64,
    lon: f64,
}
