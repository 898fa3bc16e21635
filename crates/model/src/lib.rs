use geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A curated point of interest in canonical form.
///
/// Landmarks are built once per application load by the ingest crate and are
/// never mutated afterwards.
///
/// Shape contract:
/// - `id` is globally unique across the merged set: `lowercase(city) + "-" + raw id`.
/// - `experiencetag` is always present (possibly empty); duplicates and
///   insertion order are preserved.
/// - `lat`/`lng` carry whatever the source said, including `NaN` when the
///   source omitted a coordinate. Range validation is deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub city: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// Single-valued classification of what the place is (e.g. Historic, Park).
    pub typetag: String,
    /// Multi-valued classification of how the place fits a visit (e.g. Free, Outdoors).
    pub experiencetag: Vec<String>,
}

impl Landmark {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
