use geo::{GeoPoint, haversine_miles};
use model::Landmark;

/// A landmark with its great-circle distance from the query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearby<'a> {
    pub landmark: &'a Landmark,
    pub distance_miles: f64,
}

/// Distance-ranked "nearby" view.
///
/// - No origin, no result: `None` yields an empty vector without touching
///   the landmark set.
/// - The radius boundary is inclusive. Landmarks with `NaN` coordinates
///   produce a `NaN` distance and never pass the radius test.
/// - Results are sorted ascending by distance with a stable sort, so equal
///   distances keep input order, then truncated to `limit` (closest-first
///   truncation).
pub fn compute_nearby<'a>(
    landmarks: &'a [Landmark],
    origin: Option<GeoPoint>,
    radius_miles: f64,
    limit: usize,
) -> Vec<Nearby<'a>> {
    let Some(origin) = origin else {
        return Vec::new();
    };

    let mut out: Vec<Nearby<'a>> = landmarks
        .iter()
        .map(|lm| Nearby {
            landmark: lm,
            distance_miles: haversine_miles(origin, lm.position()),
        })
        .filter(|n| n.distance_miles <= radius_miles)
        .collect();

    out.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::compute_nearby;
    use geo::{EARTH_RADIUS_MILES, GeoPoint};
    use model::Landmark;

    fn lm_at(id: &str, lat: f64, lng: f64) -> Landmark {
        Landmark {
            id: id.to_string(),
            city: "Troy".to_string(),
            name: id.to_string(),
            description: None,
            address: None,
            website: None,
            lat,
            lng,
            typetag: String::new(),
            experiencetag: Vec::new(),
        }
    }

    /// A point `miles` due north of `origin`; along a meridian the haversine
    /// distance reduces to exactly `radius * delta_lat`.
    fn north_of(origin: GeoPoint, miles: f64) -> (f64, f64) {
        let lat = origin.lat_deg + (miles / EARTH_RADIUS_MILES).to_degrees();
        (lat, origin.lng_deg)
    }

    #[test]
    fn no_origin_yields_an_empty_result() {
        let landmarks = vec![lm_at("a", 42.73, -73.68)];
        assert!(compute_nearby(&landmarks, None, 3.0, 10).is_empty());
    }

    #[test]
    fn radius_boundary_is_inclusive_of_near_and_excludes_far() {
        let origin = GeoPoint::new(42.68, -73.75);
        let (near_lat, near_lng) = north_of(origin, 2.9);
        let (far_lat, far_lng) = north_of(origin, 3.1);

        let landmarks = vec![
            lm_at("near", near_lat, near_lng),
            lm_at("far", far_lat, far_lng),
        ];

        let out = compute_nearby(&landmarks, Some(origin), 3.0, 10);
        let ids: Vec<&str> = out.iter().map(|n| n.landmark.id.as_str()).collect();
        assert_eq!(ids, vec!["near"]);
        assert!((out[0].distance_miles - 2.9).abs() < 1e-6);
    }

    #[test]
    fn a_landmark_exactly_at_the_radius_is_included() {
        let origin = GeoPoint::new(42.68, -73.75);
        let (lat, lng) = north_of(origin, 3.0);
        let landmark = lm_at("edge", lat, lng);

        // Use the landmark's own computed distance as the radius, so the
        // boundary case is exact rather than subject to rounding.
        let radius = geo::haversine_miles(origin, landmark.position());
        let landmarks = vec![landmark];

        let out = compute_nearby(&landmarks, Some(origin), radius, 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].distance_miles, radius);
    }

    #[test]
    fn results_sort_ascending_and_truncate_closest_first() {
        let origin = GeoPoint::new(42.68, -73.75);
        let mut landmarks = Vec::new();
        for (id, miles) in [("c", 2.5), ("a", 0.5), ("b", 1.5), ("d", 2.9)] {
            let (lat, lng) = north_of(origin, miles);
            landmarks.push(lm_at(id, lat, lng));
        }

        let out = compute_nearby(&landmarks, Some(origin), 3.0, 3);
        let ids: Vec<&str> = out.iter().map(|n| n.landmark.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(out.windows(2).all(|w| w[0].distance_miles <= w[1].distance_miles));
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let origin = GeoPoint::new(42.68, -73.75);
        let (lat, lng) = north_of(origin, 1.0);
        let landmarks = vec![lm_at("first", lat, lng), lm_at("second", lat, lng)];

        let out = compute_nearby(&landmarks, Some(origin), 3.0, 10);
        let ids: Vec<&str> = out.iter().map(|n| n.landmark.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn nan_coordinates_never_pass_the_radius_test() {
        let origin = GeoPoint::new(42.68, -73.75);
        let landmarks = vec![lm_at("broken", f64::NAN, f64::NAN)];
        assert!(compute_nearby(&landmarks, Some(origin), 3.0, 10).is_empty());
    }
}
