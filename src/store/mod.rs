//! Key-value persistence for engine state
//!
//! The engine keeps five independently keyed JSON values. Any backend that
//! can get and set a JSON value by string key can hold them.

mod atomic;
mod file;
mod memory;

pub(crate) use atomic::{lock_exclusive, replace_file};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;

/// Storage key for the player's total XP (integer)
pub const KEY_TOTAL_XP: &str = "rpg_total_xp";
/// Storage key for the stat list (array of Stat)
pub const KEY_STATS: &str = "rpg_stats";
/// Storage key for unlocked badge levels (array of integers)
pub const KEY_BADGES: &str = "rpg_badges";
/// Storage key for the habit list (array of Habit)
pub const KEY_HABITS: &str = "rpg_habits";
/// Storage key for completion history (date -> array of habit ids)
pub const KEY_HISTORY: &str = "rpg_history";

/// Error type for store backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in store: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous string-keyed store of JSON values
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
