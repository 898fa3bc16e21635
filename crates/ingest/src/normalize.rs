use model::Landmark;

use crate::city_file::{CityFile, RawLandmark};

/// Converts one city file into canonical landmarks, in input order.
///
/// Policy:
/// - `id` is `lowercase(city) + "-" + raw id`. An absent raw id renders as
///   an empty suffix. No collision detection is performed; two files sharing
///   a city name and raw ids collide silently.
/// - `typetag` is the first defined of `typetag`, legacy `type`, `""`.
/// - `experiencetag` is always a list after normalization.
pub fn normalize(city_file: &CityFile) -> Vec<Landmark> {
    let city_key = city_file.city.to_lowercase();
    city_file
        .landmarks
        .iter()
        .map(|raw| normalize_record(&city_file.city, &city_key, raw))
        .collect()
}

/// Application-level merge: `normalize` applied to each file in declaration
/// order, concatenated. No cross-city dedup.
pub fn merge(city_files: &[CityFile]) -> Vec<Landmark> {
    let mut out = Vec::new();
    for file in city_files {
        out.extend(normalize(file));
    }
    out
}

fn normalize_record(city: &str, city_key: &str, raw: &RawLandmark) -> Landmark {
    let raw_id = raw.id.as_deref().unwrap_or("");
    let typetag = raw
        .typetag
        .clone()
        .or_else(|| raw.legacy_type.clone())
        .unwrap_or_default();

    Landmark {
        id: format!("{city_key}-{raw_id}"),
        city: city.to_string(),
        name: raw.name.clone().unwrap_or_default(),
        description: raw.description.clone(),
        address: raw.address.clone(),
        website: raw.website.clone(),
        lat: raw.latitude,
        lng: raw.longitude,
        typetag,
        experiencetag: raw.experiencetag.clone(),
    }
}
