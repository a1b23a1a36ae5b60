//! Pure scoring functions: running totals, win detection, and the live
//! sum check for the round entry form.

use std::cmp::Ordering;

use crate::game::{Match, PLAYER_COUNT};

/// Per-player running totals across all rounds, in player order.
pub fn totals(game: &Match) -> [i32; PLAYER_COUNT] {
    let mut totals = [0; PLAYER_COUNT];
    for round in &game.rounds {
        for (total, score) in totals.iter_mut().zip(round.scores()) {
            *total += score;
        }
    }
    totals
}

/// Index of the winning player, if any.
///
/// A candidate is any player with a total at or above `threshold`. Among
/// candidates the strictly highest total wins; an exact tie resolves to the
/// lowest player index (the scan only replaces the running best on a strict
/// `>` comparison).
pub fn find_winner(totals: &[i32; PLAYER_COUNT], threshold: i32) -> Option<usize> {
    let mut winner: Option<(usize, i32)> = None;
    for (index, &total) in totals.iter().enumerate() {
        if total >= threshold && winner.map_or(true, |(_, best)| total > best) {
            winner = Some((index, total));
        }
    }
    winner.map(|(index, _)| index)
}

/// Sum of a round entry as typed so far.
pub fn running_sum(scores: &[i32; PLAYER_COUNT]) -> i32 {
    scores.iter().sum()
}

/// How a round entry's sum compares to the target. Drives the live
/// under/exact/over coloring of the entry form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SumCheck {
    Under,
    Exact,
    Over,
}

pub fn check_sum(scores: &[i32; PLAYER_COUNT], target: i32) -> SumCheck {
    match running_sum(scores).cmp(&target) {
        Ordering::Less => SumCheck::Under,
        Ordering::Equal => SumCheck::Exact,
        Ordering::Greater => SumCheck::Over,
    }
}
