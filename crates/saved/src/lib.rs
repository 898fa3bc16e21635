use std::collections::{BTreeMap, BTreeSet};

/// Storage key for the saved-landmark id array.
pub const SAVED_KEY: &str = "landmarks.saved";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    StorageUnavailable,
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageUnavailable => write!(f, "browser storage unavailable"),
            StoreError::Io(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Injected key-value collaborator. The saved-set logic has no I/O of its
/// own; everything durable goes through this seam.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Pure membership flip: adds `id` if absent, removes it if present.
/// Applying it twice with the same id returns the original set.
pub fn toggle_saved(saved: &BTreeSet<String>, id: &str) -> BTreeSet<String> {
    let mut out = saved.clone();
    if !out.remove(id) {
        out.insert(id.to_string());
    }
    out
}

/// The user's saved landmarks, persisted through a `KvStore`.
///
/// Loading fails soft: an absent key, a store error, or a corrupt payload
/// all yield the empty set. Writes happen on every toggle and are
/// best-effort; a failing store never blocks the in-memory flip.
#[derive(Debug)]
pub struct SavedLandmarks<S: KvStore> {
    store: S,
    ids: BTreeSet<String>,
}

impl<S: KvStore> SavedLandmarks<S> {
    pub fn load(store: S) -> Self {
        let ids = match store.get(SAVED_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw)
                .map(|v| v.into_iter().collect())
                .unwrap_or_default(),
            _ => BTreeSet::new(),
        };
        Self { store, ids }
    }

    /// Flips membership of `id` and rewrites the full array to the store.
    /// Returns the new membership state.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.ids = toggle_saved(&self.ids, id);
        self.persist();
        self.ids.contains(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let ids: Vec<&String> = self.ids.iter().collect();
        if let Ok(raw) = serde_json::to_string(&ids) {
            let _ = self.store.set(SAVED_KEY, &raw);
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{KvStore, StoreError};

    /// Browser localStorage behind the `KvStore` seam.
    #[derive(Debug)]
    pub struct LocalStorageKvStore;

    impl LocalStorageKvStore {
        pub fn new() -> Result<Self, StoreError> {
            // Probe availability up front so callers can fall back.
            window_local_storage()?;
            Ok(Self)
        }
    }

    impl KvStore for LocalStorageKvStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            let storage = window_local_storage()?;
            storage
                .get_item(key)
                .map_err(|e| StoreError::Io(format!("get_item failed: {:?}", e)))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let storage = window_local_storage()?;
            storage
                .set_item(key, value)
                .map_err(|e| StoreError::Io(format!("set_item failed: {:?}", e)))
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, StoreError> {
        let win = web_sys::window().ok_or(StoreError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| StoreError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(StoreError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageKvStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageKvStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageKvStore {
    pub fn new() -> Result<Self, StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KvStore for LocalStorageKvStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::StorageUnavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}
