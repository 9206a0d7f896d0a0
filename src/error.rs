use std::io;

/// Errors surfaced by the preset store.
///
/// Reads never produce these: a missing or corrupt file degrades to an empty
/// result. Writes propagate them, with no retry and no rollback.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("preset not found: {0}")]
    NotFound(String),
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(id: &str) -> Self {
        Self::NotFound(id.to_string())
    }
}
