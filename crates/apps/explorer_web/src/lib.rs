use geo::GeoPoint;
use ingest::{CityFile, CityFileError, merge};
use model::Landmark;
use query::{FilterSelection, Nearby, compute_nearby, filter_landmarks};
use saved::{KvStore, SavedLandmarks};
use watch::{Position, PositionWatch, WatchError};

#[cfg(target_arch = "wasm32")]
mod wasm_api;

/// Nearby view tuning.
pub const NEARBY_RADIUS_MILES: f64 = 3.0;
pub const NEARBY_LIMIT: usize = 10;

/// Parses and merges the three bundled city files, in declaration order.
///
/// The assets ship inside the binary; a parse failure here is a build
/// defect, not a runtime condition, so it surfaces as an error rather than
/// degrading.
pub fn bundled_landmarks() -> Result<Vec<Landmark>, CityFileError> {
    let payloads = [
        include_str!("../assets/cities/troy.json"),
        include_str!("../assets/cities/albany.json"),
        include_str!("../assets/cities/schenectady.json"),
    ];

    let mut files = Vec::with_capacity(payloads.len());
    for payload in payloads {
        files.push(CityFile::from_json_str(payload)?);
    }
    Ok(merge(&files))
}

/// The application core: the immutable landmark set plus the three pieces of
/// session state (filter selection, saved set, position watch).
///
/// Platform-neutral; the wasm facade wraps it for the browser and a plain
/// `InMemoryKvStore` backs it in tests.
pub struct AppState<S: KvStore> {
    landmarks: Vec<Landmark>,
    selection: FilterSelection,
    saved: SavedLandmarks<S>,
    watch: PositionWatch,
}

impl<S: KvStore> AppState<S> {
    pub fn new(store: S) -> Result<Self, CityFileError> {
        let landmarks = bundled_landmarks()?;
        let saved = SavedLandmarks::load(store);
        tracing::debug!(
            landmarks = landmarks.len(),
            saved = saved.len(),
            "app state initialized"
        );
        Ok(Self {
            landmarks,
            selection: FilterSelection::new(),
            saved,
            watch: PositionWatch::new(),
        })
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn toggle_city(&mut self, city: &str) {
        self.selection.toggle_city(city);
        tracing::debug!(city = ?self.selection.selected_city, "city filter toggled");
    }

    pub fn toggle_type(&mut self, typetag: &str) {
        self.selection.toggle_type(typetag);
        tracing::debug!(typetag = ?self.selection.selected_type, "type filter toggled");
    }

    pub fn toggle_experience_tag(&mut self, tag: &str) {
        self.selection.toggle_experience_tag(tag);
        tracing::debug!(
            tags = self.selection.selected_experience_tags.len(),
            "experience tag toggled"
        );
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    /// The landmarks passing the current selection, recomputed in full.
    pub fn visible(&self) -> Vec<&Landmark> {
        filter_landmarks(&self.landmarks, &self.selection)
    }

    /// Distance-ranked landmarks around the latest watched position. Empty
    /// until a position has arrived.
    pub fn nearby(&self) -> Vec<Nearby<'_>> {
        let origin = self.watch.latest().map(|p| p.point);
        compute_nearby(&self.landmarks, origin, NEARBY_RADIUS_MILES, NEARBY_LIMIT)
    }

    pub fn toggle_saved(&mut self, id: &str) -> bool {
        let now_saved = self.saved.toggle(id);
        tracing::debug!(id, now_saved, "saved toggled");
        now_saved
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.contains(id)
    }

    pub fn saved_ids(&self) -> Vec<&str> {
        self.saved.ids().iter().map(String::as_str).collect()
    }

    pub fn push_position(&mut self, lat_deg: f64, lng_deg: f64, accuracy_m: f64) {
        self.watch.push(Position {
            point: GeoPoint::new(lat_deg, lng_deg),
            accuracy_m,
        });
    }

    pub fn fail_position(&mut self, error: WatchError) {
        tracing::warn!(%error, "position watch error");
        self.watch.fail(error);
    }

    /// The user-facing message for the current watch error, if any.
    pub fn location_error_message(&self) -> Option<&'static str> {
        self.watch.error().map(WatchError::user_message)
    }

    pub fn release_watch(&mut self) {
        self.watch.unsubscribe();
    }

    pub fn watch(&self) -> &PositionWatch {
        &self.watch
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, NEARBY_LIMIT, NEARBY_RADIUS_MILES, bundled_landmarks};
    use pretty_assertions::assert_eq;
    use saved::InMemoryKvStore;
    use std::collections::BTreeSet;
    use watch::WatchError;

    fn app() -> AppState<InMemoryKvStore> {
        AppState::new(InMemoryKvStore::new()).expect("bundled assets parse")
    }

    #[test]
    fn bundled_assets_cover_three_cities_with_unique_ids() {
        let landmarks = bundled_landmarks().unwrap();
        assert_eq!(landmarks.len(), 17);

        let cities: BTreeSet<&str> = landmarks.iter().map(|lm| lm.city.as_str()).collect();
        assert_eq!(
            cities,
            ["Albany", "Schenectady", "Troy"].into_iter().collect()
        );

        let ids: BTreeSet<&str> = landmarks.iter().map(|lm| lm.id.as_str()).collect();
        assert_eq!(ids.len(), landmarks.len());
    }

    #[test]
    fn legacy_type_files_normalize_like_new_ones() {
        let landmarks = bundled_landmarks().unwrap();
        let proctors = landmarks.iter().find(|lm| lm.id == "schenectady-1").unwrap();
        assert_eq!(proctors.typetag, "Theater");
        // The one record without an experiencetag list still carries one.
        let jay = landmarks.iter().find(|lm| lm.id == "schenectady-5").unwrap();
        assert!(jay.experiencetag.is_empty());
    }

    #[test]
    fn default_selection_shows_everything() {
        let app = app();
        assert_eq!(app.visible().len(), app.landmarks().len());
    }

    #[test]
    fn drilling_down_narrows_the_visible_set() {
        let mut app = app();
        app.toggle_city("Troy");
        let troy_count = {
            let troy_only = app.visible();
            assert!(troy_only.iter().all(|lm| lm.city == "Troy"));
            assert_eq!(troy_only.len(), 6);
            troy_only.len()
        };

        app.toggle_experience_tag("Free");
        app.toggle_experience_tag("Outdoors");
        let free_outdoors = app.visible();
        assert!(free_outdoors.len() < troy_count);
        for lm in &free_outdoors {
            assert!(lm.experiencetag.iter().any(|t| t == "Free"));
            assert!(lm.experiencetag.iter().any(|t| t == "Outdoors"));
        }

        app.clear_filters();
        assert_eq!(app.visible().len(), app.landmarks().len());
    }

    #[test]
    fn nearby_is_empty_until_a_position_arrives() {
        let mut app = app();
        assert!(app.nearby().is_empty());

        // Downtown Troy: Troy landmarks are in range, Albany's are not.
        app.push_position(42.7312, -73.691, 15.0);
        let nearby = app.nearby();
        assert!(!nearby.is_empty());
        assert!(nearby.len() <= NEARBY_LIMIT);
        for n in &nearby {
            assert!(n.distance_miles <= NEARBY_RADIUS_MILES);
            assert_eq!(n.landmark.city, "Troy");
        }
        assert!(
            nearby
                .windows(2)
                .all(|w| w[0].distance_miles <= w[1].distance_miles)
        );
    }

    #[test]
    fn releasing_the_watch_empties_nearby() {
        let mut app = app();
        app.push_position(42.7312, -73.691, 15.0);
        assert!(!app.nearby().is_empty());

        app.release_watch();
        assert!(app.nearby().is_empty());
    }

    #[test]
    fn watch_errors_surface_one_user_message() {
        let mut app = app();
        assert_eq!(app.location_error_message(), None);

        app.fail_position(WatchError::PermissionDenied);
        assert!(app.location_error_message().is_some());

        app.push_position(42.7312, -73.691, 15.0);
        assert_eq!(app.location_error_message(), None);
    }

    #[test]
    fn saved_toggles_survive_a_reload_through_the_same_store() {
        let mut app = app();
        assert!(app.toggle_saved("troy-3"));
        assert!(app.toggle_saved("albany-4"));
        assert!(!app.toggle_saved("troy-3"));
        assert_eq!(app.saved_ids(), vec!["albany-4"]);

        // Same backing store, fresh session.
        let store = {
            let AppState { saved, .. } = app;
            saved.into_store()
        };
        let app = AppState::new(store).unwrap();
        assert!(app.is_saved("albany-4"));
        assert!(!app.is_saved("troy-3"));
    }
}
