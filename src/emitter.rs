//! Event names published on the notification port.
//!
//! Payloads are strings: the serialized affected match for change events,
//! the winning player's name for [`WINNER_DETECTED`], empty for
//! [`HISTORY_CLEARED`]. Rendering collaborators subscribe via
//! `MatchStore::on`.

pub const MATCH_CREATED: &str = "MatchCreated";
pub const ROUND_ADDED: &str = "RoundAdded";
pub const ROUND_DELETED: &str = "RoundDeleted";
pub const MATCH_RESET: &str = "MatchReset";
pub const HISTORY_CLEARED: &str = "HistoryCleared";
pub const WINNER_DETECTED: &str = "WinnerDetected";
