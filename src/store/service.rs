//! Preset operations over the record store.
//!
//! Each operation is one whole-file read-modify-write round. NotFound checks
//! happen before any write, so a failed operation leaves the store file
//! untouched.

use crate::error::StoreError;
use crate::store::storage::StoreHandle;
use crate::types::{CreatePreset, Preset, PresetList, PresetPatch, PresetSummary};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

pub struct PresetService {
    handle: StoreHandle,
}

impl PresetService {
    pub fn new(handle: StoreHandle) -> Self {
        Self { handle }
    }

    /// Lists every preset without its payload, newest first. Never fails:
    /// read problems degrade to an empty list.
    pub fn list(&self) -> PresetList {
        let store = self.handle.load();
        let mut list: Vec<PresetSummary> = store
            .presets
            .values()
            .map(|p| PresetSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                updated_at: p.updated_at,
            })
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        PresetList {
            active_id: store.active_id,
            list,
        }
    }

    pub fn get(&self, id: &str) -> Result<Preset, StoreError> {
        let store = self.handle.load();
        store
            .presets
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Creates a preset with defaults for omitted fields and makes it the
    /// active one. Returns the new id.
    pub fn create(&self, req: CreatePreset) -> Result<String, StoreError> {
        let mut store = self.handle.load();
        let preset = Preset::new(
            req.name.unwrap_or_else(|| "Untitled".to_string()),
            req.tree_data.unwrap_or(Value::Null),
            req.settings.unwrap_or_default(),
        );
        let id = preset.id.clone();
        debug!(id = %id, name = %preset.name, "creating preset");
        store.active_id = Some(id.clone());
        store.presets.insert(id.clone(), preset);
        self.handle.save(&store)?;
        Ok(id)
    }

    /// Merges the provided fields over the existing preset and refreshes its
    /// timestamp. Omitted fields keep their prior value.
    pub fn update(&self, id: &str, patch: PresetPatch) -> Result<(), StoreError> {
        let mut store = self.handle.load();
        let preset = store
            .presets
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;

        if let Some(name) = patch.name {
            preset.name = name;
        }
        if let Some(tree_data) = patch.tree_data {
            preset.tree_data = tree_data;
        }
        if let Some(settings) = patch.settings {
            preset.settings = settings;
        }
        preset.updated_at = Utc::now();

        self.handle.save(&store)
    }

    /// Removes a preset. Deleting the active preset repoints `activeId` to an
    /// arbitrary remaining preset, or clears it, before anything is
    /// persisted. Returns the new active id.
    pub fn delete(&self, id: &str) -> Result<Option<String>, StoreError> {
        let mut store = self.handle.load();
        if store.presets.remove(id).is_none() {
            return Err(StoreError::not_found(id));
        }
        if store.active_id.as_deref() == Some(id) {
            store.active_id = store.presets.keys().next().cloned();
        }
        debug!(id = %id, new_active = ?store.active_id, "deleted preset");
        self.handle.save(&store)?;
        Ok(store.active_id)
    }

    /// Sets the active pointer without validating that the id exists; the
    /// caller owns that check. Readers ignore a dangling pointer.
    pub fn set_active(&self, id: &str) -> Result<(), StoreError> {
        let mut store = self.handle.load();
        store.active_id = Some(id.to_string());
        self.handle.save(&store)
    }

    /// Backward-compatible single-document read: the active preset's payload
    /// if one resolves, else the raw legacy file contents, else JSON null.
    pub fn legacy_document(&self) -> Value {
        let store = self.handle.load();
        if let Some(preset) = store
            .active_id
            .as_ref()
            .and_then(|id| store.presets.get(id))
        {
            return json!({
                "treeData": preset.tree_data,
                "settings": preset.settings,
            });
        }
        self.handle.read_legacy().unwrap_or(Value::Null)
    }

    /// Backward-compatible single-document write, straight to the legacy
    /// file. The preset store is not consulted or modified.
    pub fn save_legacy_document(&self, doc: &Value) -> Result<(), StoreError> {
        self.handle.write_legacy(doc)
    }

    #[cfg(test)]
    fn store_bytes(&self) -> Option<Vec<u8>> {
        std::fs::read(self.handle.store_path()).ok()
    }
}
