mod confirm;
pub mod emitter;
mod error;
mod game;
mod rules;
mod score;
mod storage;
mod store;

pub use confirm::Confirmation;
pub use error::{StorageError, ValidationError};
pub use game::{Match, MatchId, Round, PLAYER_COUNT};
pub use rules::{Rules, DEFAULT_ROUND_TARGET, DEFAULT_WIN_THRESHOLD};
pub use score::{check_sum, find_winner, running_sum, totals, SumCheck};
pub use storage::{FileStore, MemoryStore, ScoreStore, CURRENT_ID_KEY, GAMES_KEY};
pub use store::{MatchStore, RoundAccepted, Winner};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
