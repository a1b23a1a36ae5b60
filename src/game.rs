use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Hazari is always played by four players.
pub const PLAYER_COUNT: usize = 4;

/// Match identifier: milliseconds since the Unix epoch at creation time.
///
/// Doubles as the sort/display key for the match list. Uniqueness within a
/// collection is enforced by the store, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(i64);

impl MatchId {
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);
        MatchId(millis)
    }

    pub fn from_millis(millis: i64) -> Self {
        MatchId(millis)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    /// The next candidate id. Used to keep ids unique when two matches are
    /// created within the same millisecond.
    pub fn next(&self) -> Self {
        MatchId(self.0 + 1)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scored hand: four per-player point values, positionally aligned with
/// `Match::players`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round(pub [i32; PLAYER_COUNT]);

impl Round {
    pub fn scores(&self) -> &[i32; PLAYER_COUNT] {
        &self.0
    }

    pub fn sum(&self) -> i32 {
        self.0.iter().sum()
    }
}

/// One game session: four fixed players and an ordered list of rounds.
///
/// Serializes to the layout the browser scoreboard stores under its
/// `hazari_games` key, `isActive` included (legacy flag, written for
/// compatibility, never consulted).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub players: [String; PLAYER_COUNT],
    pub rounds: Vec<Round>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

impl Match {
    pub fn new(id: MatchId, players: [String; PLAYER_COUNT]) -> Self {
        Match {
            id,
            players,
            rounds: Vec::new(),
            is_active: true,
        }
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Sidebar label: player names joined with ", ".
    pub fn label(&self) -> String {
        self.players.join(", ")
    }
}
