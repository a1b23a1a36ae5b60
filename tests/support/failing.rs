use hazari_score::{ScoreStore, StorageError};

/// Storage backend whose writes always fail, for exercising the non-fatal
/// persistence-error path. Reads come up empty.
pub struct FailingStore;

impl ScoreStore for FailingStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }
}
