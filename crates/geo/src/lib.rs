// Geo crate: small, well-tested geodesy primitives only.

/// Mean Earth radius used for great-circle distances (miles).
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// A geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }
}

/// Great-circle distance between two points via the haversine formula.
///
/// Symmetric in its arguments and zero for identical points. Coordinates are
/// not range-checked; callers own the integrity of their data.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lng = (b.lng_deg - a.lng_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}
