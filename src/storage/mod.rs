//! Key-value persistence port. Mirrors the localStorage layout the browser
//! scoreboard persists to.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Key holding the serialized match collection (JSON array of matches).
pub const GAMES_KEY: &str = "hazari_games";

/// Key holding the active match id as a decimal string, absent when no match
/// is active.
pub const CURRENT_ID_KEY: &str = "hazari_current_id";

/// Abstract key-value storage for scoreboard state.
pub trait ScoreStore: Send + Sync {
    /// Read a value by key. Returns None if the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
