//! Preset store: durable record file, legacy migration, service operations.
//!
//! Every operation follows the same discipline: read the whole store file,
//! act, write the whole store file back. The file carries no lock, so two
//! concurrent requests can interleave their read/write rounds and the last
//! writer wins silently. Known hazard, accepted for a single-user backend.

mod migrate;
mod service;
mod storage;

pub use service::PresetService;
pub use storage::{default_data_dir, StoreHandle};
