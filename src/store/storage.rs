//! File system operations for the preset store.

use crate::error::StoreError;
use crate::store::migrate;
use crate::types::Store;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const STORE_FILE: &str = "presets.json";
const LEGACY_FILE: &str = "data.json";

/// Handle to the two backing files of one data directory. Constructed
/// explicitly and injected into the service; there is no ambient global path.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    store_path: PathBuf,
    legacy_path: PathBuf,
}

/// Default data directory, next to other per-user application data.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("treedeck")
}

impl StoreHandle {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            store_path: dir.join(STORE_FILE),
            legacy_path: dir.join(LEGACY_FILE),
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Loads the current store. Infallible: a missing or unparsable store
    /// file hands off to the legacy migrator, which at worst yields an empty
    /// store. Reads prioritize availability over strictness.
    pub fn load(&self) -> Store {
        match fs::read_to_string(&self.store_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(store) => store,
                Err(err) => {
                    warn!(
                        path = %self.store_path.display(),
                        error = %err,
                        "store file unparsable, treating as absent"
                    );
                    migrate::from_legacy(self)
                }
            },
            Err(_) => migrate::from_legacy(self),
        }
    }

    /// Overwrites the store file with the full serialized store. Whole-file
    /// writes only; a crash mid-write can corrupt the file (no atomic
    /// rename), which the next load treats as absent.
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(store)?;
        fs::write(&self.store_path, json)?;
        Ok(())
    }

    /// Reads the legacy single-document file, if it exists and parses.
    pub fn read_legacy(&self) -> Option<Value> {
        let contents = fs::read_to_string(&self.legacy_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Writes the legacy single-document file verbatim, bypassing the store.
    pub fn write_legacy(&self, doc: &Value) -> Result<(), StoreError> {
        if let Some(parent) = self.legacy_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&self.legacy_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Preset;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    fn handle() -> (TempDir, StoreHandle) {
        let dir = TempDir::new().unwrap();
        let handle = StoreHandle::new(dir.path());
        (dir, handle)
    }

    #[test]
    fn load_with_no_files_returns_empty_store() {
        let (_dir, handle) = handle();
        let store = handle.load();
        assert!(store.active_id.is_none());
        assert!(store.presets.is_empty());
        // nothing usable to migrate, so nothing was persisted
        assert!(!handle.store_path().exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, handle) = handle();
        let mut store = Store::default();
        let preset = Preset::new("A".to_string(), json!({ "k": 1 }), Map::new());
        store.active_id = Some(preset.id.clone());
        store.presets.insert(preset.id.clone(), preset);
        handle.save(&store).unwrap();

        let loaded = handle.load();
        assert_eq!(loaded.active_id, store.active_id);
        assert_eq!(loaded.presets.len(), 1);
    }

    #[test]
    fn save_of_loaded_store_rewrites_identical_bytes() {
        let (_dir, handle) = handle();
        let mut store = Store::default();
        for name in ["a", "b", "c"] {
            let preset = Preset::new(name.to_string(), json!([name]), Map::new());
            store.active_id = Some(preset.id.clone());
            store.presets.insert(preset.id.clone(), preset);
        }
        handle.save(&store).unwrap();

        let before = fs::read_to_string(handle.store_path()).unwrap();
        handle.save(&handle.load()).unwrap();
        let after = fs::read_to_string(handle.store_path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn corrupt_store_without_legacy_degrades_to_empty() {
        let (dir, handle) = handle();
        fs::write(dir.path().join("presets.json"), "{not json").unwrap();
        let store = handle.load();
        assert!(store.presets.is_empty());
    }

    #[test]
    fn corrupt_store_with_legacy_triggers_migration() {
        let (dir, handle) = handle();
        fs::write(dir.path().join("presets.json"), "{not json").unwrap();
        fs::write(dir.path().join("data.json"), r#"{"foo":"bar"}"#).unwrap();
        let store = handle.load();
        assert_eq!(store.presets.len(), 1);
        assert!(store.active_id.is_some());
    }

    #[test]
    fn legacy_round_trip_bypasses_store() {
        let (_dir, handle) = handle();
        let doc = json!({ "treeData": { "root": [] }, "settings": { "zoom": 2 } });
        handle.write_legacy(&doc).unwrap();
        assert_eq!(handle.read_legacy(), Some(doc));
        assert!(!handle.store_path().exists());
    }
}
