//! HTTP route handlers, one per preset service operation.

use crate::error::StoreError;
use crate::store::PresetService;
use crate::types::{CreatePreset, Preset, PresetList, PresetPatch};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

pub fn router(service: Arc<PresetService>) -> Router {
    Router::new()
        .route("/api/presets", get(list_presets).post(create_preset))
        .route(
            "/api/presets/{id}",
            get(get_preset).put(update_preset).delete(delete_preset),
        )
        .route("/api/presets/{id}/activate", put(activate_preset))
        .route("/api/tree", get(get_tree).post(save_tree))
        .with_state(service)
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Io(_) | StoreError::Encode(_) => {
                error!(error = %self, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn list_presets(State(service): State<Arc<PresetService>>) -> Json<PresetList> {
    Json(service.list())
}

async fn get_preset(
    State(service): State<Arc<PresetService>>,
    Path(id): Path<String>,
) -> Result<Json<Preset>, StoreError> {
    Ok(Json(service.get(&id)?))
}

async fn create_preset(
    State(service): State<Arc<PresetService>>,
    Json(req): Json<CreatePreset>,
) -> Result<Json<Value>, StoreError> {
    let id = service.create(req)?;
    Ok(Json(json!({ "id": id })))
}

async fn update_preset(
    State(service): State<Arc<PresetService>>,
    Path(id): Path<String>,
    Json(patch): Json<PresetPatch>,
) -> Result<Json<Value>, StoreError> {
    service.update(&id, patch)?;
    Ok(Json(json!({ "ok": true })))
}

async fn delete_preset(
    State(service): State<Arc<PresetService>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StoreError> {
    let new_active_id = service.delete(&id)?;
    Ok(Json(json!({ "newActiveId": new_active_id })))
}

async fn activate_preset(
    State(service): State<Arc<PresetService>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StoreError> {
    service.set_active(&id)?;
    Ok(Json(json!({ "ok": true })))
}

async fn get_tree(State(service): State<Arc<PresetService>>) -> Json<Value> {
    Json(service.legacy_document())
}

async fn save_tree(
    State(service): State<Arc<PresetService>>,
    Json(doc): Json<Value>,
) -> Result<Json<Value>, StoreError> {
    service.save_legacy_document(&doc)?;
    Ok(Json(json!({ "ok": true })))
}
