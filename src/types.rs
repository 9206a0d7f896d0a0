use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Generates a fresh preset id. UUIDv4 rather than a timestamp so that rapid
/// successive creates can never collide.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// One saved tree document. `tree_data` and `settings` are opaque to the
/// store layer: they are persisted and returned verbatim, never inspected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tree_data: Value,
    #[serde(default)]
    pub settings: Map<String, Value>,
    pub updated_at: DateTime<Utc>,
}

impl Preset {
    pub fn new(name: String, tree_data: Value, settings: Map<String, Value>) -> Self {
        Self {
            id: fresh_id(),
            name,
            tree_data,
            settings,
            updated_at: Utc::now(),
        }
    }
}

/// The persisted root object: every preset keyed by id, plus the pointer to
/// the active one. A `BTreeMap` keeps serialization deterministic, so saving
/// an unchanged store rewrites identical bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub active_id: Option<String>,
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

/// Listing entry: identity and freshness only, payloads excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSummary {
    pub id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetList {
    pub active_id: Option<String>,
    pub list: Vec<PresetSummary>,
}

/// Request body for preset creation. Omitted fields get defaults:
/// name `"Untitled"`, tree data `null`, empty settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePreset {
    pub name: Option<String>,
    pub tree_data: Option<Value>,
    pub settings: Option<Map<String, Value>>,
}

/// Partial update body. Only fields present in the JSON are merged; an
/// omitted field keeps its prior value. `treeData` distinguishes omission
/// from an explicit `null` (which is stored as-is, null being a legal
/// document), hence the presence-aware deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetPatch {
    pub name: Option<String>,
    #[serde(deserialize_with = "present_value")]
    pub tree_data: Option<Value>,
    pub settings: Option<Map<String, Value>>,
}

/// Wraps whatever JSON is present (including `null`) in `Some`; the field
/// only stays `None` when absent from the body entirely.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_distinguishes_omitted_from_explicit_null() {
        let patch: PresetPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.tree_data.is_none());

        let patch: PresetPatch = serde_json::from_value(json!({ "treeData": null })).unwrap();
        assert_eq!(patch.tree_data, Some(Value::Null));

        let patch: PresetPatch =
            serde_json::from_value(json!({ "treeData": { "a": 1 } })).unwrap();
        assert_eq!(patch.tree_data, Some(json!({ "a": 1 })));
    }

    #[test]
    fn preset_serializes_camel_case() {
        let preset = Preset::new("Untitled".to_string(), Value::Null, Map::new());
        let value = serde_json::to_value(&preset).unwrap();
        assert!(value.get("treeData").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("tree_data").is_none());
    }

    #[test]
    fn store_round_trips_through_json() {
        let mut store = Store::default();
        let preset = Preset::new("A".to_string(), json!([1, 2, 3]), Map::new());
        store.active_id = Some(preset.id.clone());
        store.presets.insert(preset.id.clone(), preset);

        let encoded = serde_json::to_string(&store).unwrap();
        let decoded: Store = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.active_id, store.active_id);
        assert_eq!(decoded.presets.len(), 1);
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = fresh_id();
        let b = fresh_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
