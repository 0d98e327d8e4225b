pub mod database;
pub mod kv;
pub mod session;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use session::SessionStore;

use std::fs;
use std::path::Path;

/// Ensure the directory holding `file` exists.
pub fn ensure_parent_dir<P: AsRef<Path>>(file: P) -> std::io::Result<()> {
    if let Some(parent) = file.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
