use std::fmt;

/// Rejected user input. Recoverable: no state mutation has happened when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A player name was empty after trimming. `position` is 0-based.
    EmptyPlayerName { position: usize },
    /// A round entry's scores did not sum to the configured target.
    SumMismatch { expected: i32, actual: i32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPlayerName { position } => {
                write!(f, "player {} name must not be empty", position + 1)
            }
            ValidationError::SumMismatch { expected, actual } => write!(
                f,
                "invalid score: total must be {}, current sum is {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Persistence failure. Non-fatal: in-memory state remains usable, the
/// failed write is simply not durable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    LockPoisoned(&'static str),
    Backend(String),
    Serialize(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
            StorageError::Backend(message) => write!(f, "storage backend error: {}", message),
            StorageError::Serialize(message) => write!(f, "serialization error: {}", message),
        }
    }
}

impl std::error::Error for StorageError {}
