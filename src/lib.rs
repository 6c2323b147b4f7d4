//! app-data-store - data-path resolution and JSON persistence
//!
//! Decides where an application's data files live (installed vs portable
//! deployments) and loads/saves them as JSON, turning every filesystem or
//! decode fault into a typed [`StorageError`] or a plain `bool`.

pub mod config;
pub mod storage;

pub use config::{DataFileNames, StorageConfig};
pub use storage::error::{CodecError, Outcome, StorageError};
pub use storage::fs::{
    delete_file, ensure_directory, move_file, probe_write_privilege, try_delete, try_move,
};
pub use storage::json::{load_json, load_json_or_default, save_json, JsonCodec, SerdeJsonCodec};
pub use storage::paths::{resolve_base_dir, resolve_data_path, InstallMode, PathResolver};
pub use storage::sniff::looks_like_json_object;
pub use storage::{DataFile, DataStore};
