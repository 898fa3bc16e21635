use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use saved::{InMemoryKvStore, KvStore, LocalStorageKvStore, StoreError};
use watch::{WatchError, WatchOptions};

use crate::AppState;

/// Browser storage when available, in-memory fallback otherwise (private
/// browsing modes can make localStorage throw).
pub enum BrowserStore {
    Local(LocalStorageKvStore),
    Memory(InMemoryKvStore),
}

impl BrowserStore {
    fn detect() -> Self {
        match LocalStorageKvStore::new() {
            Ok(store) => BrowserStore::Local(store),
            Err(_) => BrowserStore::Memory(InMemoryKvStore::new()),
        }
    }
}

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            BrowserStore::Local(s) => s.get(key),
            BrowserStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            BrowserStore::Local(s) => s.set(key, value),
            BrowserStore::Memory(s) => s.set(key, value),
        }
    }
}

thread_local! {
    static APP: RefCell<Option<AppState<BrowserStore>>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&mut AppState<BrowserStore>) -> R) -> Result<R, JsValue> {
    APP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let app = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("app not initialized; call init_app first"))?;
        Ok(f(app))
    })
}

#[wasm_bindgen]
pub fn init_app() -> Result<(), JsValue> {
    let app = AppState::new(BrowserStore::detect())
        .map_err(|e| JsValue::from_str(&format!("bundled city data failed to parse: {e}")))?;
    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Options for `navigator.geolocation.watchPosition`, as JSON.
#[wasm_bindgen]
pub fn geolocation_options() -> String {
    let opts = WatchOptions::default();
    serde_json::json!({
        "enableHighAccuracy": opts.high_accuracy,
        "maximumAge": opts.maximum_age_ms,
        "timeout": opts.timeout_ms,
    })
    .to_string()
}

#[wasm_bindgen]
pub fn toggle_city(city: &str) -> Result<(), JsValue> {
    with_app(|app| app.toggle_city(city))
}

#[wasm_bindgen]
pub fn toggle_type(typetag: &str) -> Result<(), JsValue> {
    with_app(|app| app.toggle_type(typetag))
}

#[wasm_bindgen]
pub fn toggle_experience_tag(tag: &str) -> Result<(), JsValue> {
    with_app(|app| app.toggle_experience_tag(tag))
}

#[wasm_bindgen]
pub fn clear_filters() -> Result<(), JsValue> {
    with_app(|app| app.clear_filters())
}

/// The landmarks passing the current selection, as a JSON array.
#[wasm_bindgen]
pub fn visible_landmarks() -> Result<String, JsValue> {
    with_app(|app| {
        let visible = app.visible();
        serde_json::to_string(&visible).unwrap_or_else(|_| "[]".to_string())
    })
}

/// Distance-ranked landmarks around the latest position, as a JSON array of
/// `{ landmark, distance_miles }` objects.
#[wasm_bindgen]
pub fn nearby_landmarks() -> Result<String, JsValue> {
    with_app(|app| {
        let entries: Vec<serde_json::Value> = app
            .nearby()
            .iter()
            .map(|n| {
                serde_json::json!({
                    "landmark": n.landmark,
                    "distance_miles": n.distance_miles,
                })
            })
            .collect();
        serde_json::Value::Array(entries).to_string()
    })
}

#[wasm_bindgen]
pub fn toggle_saved(id: &str) -> Result<bool, JsValue> {
    with_app(|app| app.toggle_saved(id))
}

#[wasm_bindgen]
pub fn is_saved(id: &str) -> Result<bool, JsValue> {
    with_app(|app| app.is_saved(id))
}

#[wasm_bindgen]
pub fn saved_ids() -> Result<String, JsValue> {
    with_app(|app| {
        serde_json::to_string(&app.saved_ids()).unwrap_or_else(|_| "[]".to_string())
    })
}

#[wasm_bindgen]
pub fn push_position(lat_deg: f64, lng_deg: f64, accuracy_m: f64) -> Result<(), JsValue> {
    with_app(|app| app.push_position(lat_deg, lng_deg, accuracy_m))
}

/// `code` follows GeolocationPositionError: 1 permission denied,
/// 2 position unavailable, 3 timeout.
#[wasm_bindgen]
pub fn fail_position(code: u32) -> Result<(), JsValue> {
    let error = match code {
        1 => WatchError::PermissionDenied,
        3 => WatchError::Timeout,
        _ => WatchError::Unavailable,
    };
    with_app(|app| app.fail_position(error))
}

#[wasm_bindgen]
pub fn location_error_message() -> Result<Option<String>, JsValue> {
    with_app(|app| app.location_error_message().map(str::to_string))
}

#[wasm_bindgen]
pub fn release_watch() -> Result<(), JsValue> {
    with_app(|app| app.release_watch())
}
