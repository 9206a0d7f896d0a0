//! One-time migration from the legacy single-document format.

use crate::store::storage::StoreHandle;
use crate::types::{Preset, Store};
use serde_json::Value;
use tracing::{info, warn};

/// Builds a store from the legacy single-document file, or an empty store if
/// no usable legacy file exists. Called only when the store file itself is
/// absent or unparsable.
///
/// A parsable legacy document becomes exactly one preset named "Default":
/// its `treeData` field if present, else the whole document; `settings`
/// likewise, defaulting to an empty map. The result is persisted immediately
/// so later loads read the migrated file and never re-migrate.
pub(crate) fn from_legacy(handle: &StoreHandle) -> Store {
    let Some(doc) = handle.read_legacy() else {
        return Store::default();
    };

    let tree_data = doc.get("treeData").cloned().unwrap_or_else(|| doc.clone());
    let settings = doc
        .get("settings")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let preset = Preset::new("Default".to_string(), tree_data, settings);
    info!(id = %preset.id, "migrating legacy document to preset store");

    let mut store = Store::default();
    store.active_id = Some(preset.id.clone());
    store.presets.insert(preset.id.clone(), preset);

    if let Err(err) = handle.save(&store) {
        warn!(error = %err, "failed to persist migrated store");
    }
    store
}
