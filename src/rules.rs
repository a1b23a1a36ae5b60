use serde::{Deserialize, Serialize};

/// Round-sum target of the classic 360-point variant.
pub const DEFAULT_ROUND_TARGET: i32 = 360;

/// Total a player must reach or exceed to be eligible to win.
pub const DEFAULT_WIN_THRESHOLD: i32 = 1000;

/// Scoring configuration.
///
/// The two deployed variants of the scoreboard disagree on the round-sum
/// constant (360 vs. 1000), so both numbers are configuration rather than
/// literals. Defaults match the 360-point table rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Every submitted round must sum to exactly this value.
    pub round_target: i32,
    /// A total at or above this value makes a player a winning candidate.
    pub win_threshold: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            round_target: DEFAULT_ROUND_TARGET,
            win_threshold: DEFAULT_WIN_THRESHOLD,
        }
    }
}
