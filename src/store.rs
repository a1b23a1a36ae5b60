use log::warn;
use serde::Serialize;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

use crate::confirm::{Action, Confirmation};
use crate::emitter;
use crate::error::{StorageError, ValidationError};
use crate::game::{Match, MatchId, Round, PLAYER_COUNT};
use crate::rules::Rules;
use crate::score;
use crate::storage::{ScoreStore, CURRENT_ID_KEY, GAMES_KEY};

/// A detected winner, reported once per triggering round append.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub index: usize,
    pub name: String,
    pub total: i32,
}

/// Result of a successful round submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundAccepted {
    /// Set when this append pushed a player to the winning threshold. The
    /// check runs only here; deleting or resetting never retracts a win.
    pub winner: Option<Winner>,
}

/// Authoritative record of all matches and which one is active.
///
/// Owns the collection, most-recent-first, and is the only writer to the
/// storage backend. Every mutation persists synchronously before returning.
/// Persistence failures are logged and do not roll back the in-memory
/// change; hosts needing stronger guarantees can call [`MatchStore::save`]
/// and handle the error themselves.
pub struct MatchStore<S: ScoreStore> {
    games: Vec<Match>,
    current: Option<MatchId>,
    rules: Rules,
    storage: S,
    #[cfg(feature = "emitter")]
    emitter: EventEmitter,
}

impl<S: ScoreStore> MatchStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_rules(storage, Rules::default())
    }

    pub fn with_rules(storage: S, rules: Rules) -> Self {
        MatchStore {
            games: Vec::new(),
            current: None,
            rules,
            storage,
            #[cfg(feature = "emitter")]
            emitter: EventEmitter::new(),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// All matches, most recent first.
    pub fn matches(&self) -> &[Match] {
        &self.games
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn current_id(&self) -> Option<MatchId> {
        self.current
    }

    /// The active match, if the active id references one.
    pub fn active(&self) -> Option<&Match> {
        self.current.and_then(|id| self.get(id))
    }

    /// Running totals for a match, in player order.
    pub fn totals_for(&self, id: MatchId) -> Option<[i32; PLAYER_COUNT]> {
        self.get(id).map(score::totals)
    }

    /// Load persisted state. Absent keys yield an empty collection; malformed
    /// data is discarded with a warning rather than failing startup. An
    /// active id that no longer references a match is cleared, so the host
    /// falls back to its setup view.
    pub fn load(&mut self) -> Result<(), StorageError> {
        self.games = match self.storage.read(GAMES_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(games) => games,
                Err(err) => {
                    warn!("discarding malformed match history: {}", err);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        self.current = self
            .storage
            .read(CURRENT_ID_KEY)?
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(MatchId::from_millis);

        if let Some(id) = self.current {
            if self.get(id).is_none() {
                warn!("active match {} not found in history", id);
                self.current = None;
            }
        }

        Ok(())
    }

    /// Persist the collection and the active-id marker.
    pub fn save(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.games)
            .map_err(|err| StorageError::Serialize(err.to_string()))?;
        self.storage.write(GAMES_KEY, &raw)?;

        match self.current {
            Some(id) => self.storage.write(CURRENT_ID_KEY, &id.to_string())?,
            None => self.storage.remove(CURRENT_ID_KEY)?,
        }

        Ok(())
    }

    /// Create a match from the setup form. All four names must be non-empty
    /// after trimming. The new match goes to the front of the list and
    /// becomes active.
    pub fn create_match(
        &mut self,
        names: [String; PLAYER_COUNT],
    ) -> Result<MatchId, ValidationError> {
        let mut players = names;
        for (position, name) in players.iter_mut().enumerate() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::EmptyPlayerName { position });
            }
            *name = trimmed.to_string();
        }

        let mut id = MatchId::now();
        while self.get(id).is_some() {
            id = id.next();
        }

        self.games.insert(0, Match::new(id, players));
        self.current = Some(id);
        self.persist();
        self.emit_match(emitter::MATCH_CREATED, id);
        Ok(id)
    }

    /// Append a round to a match. The scores must sum to the configured
    /// round target, otherwise the entry is rejected and nothing changes.
    /// Returns `Ok(None)` when the match id is unknown (safe no-op).
    pub fn append_round(
        &mut self,
        id: MatchId,
        scores: [i32; PLAYER_COUNT],
    ) -> Result<Option<RoundAccepted>, ValidationError> {
        let actual = score::running_sum(&scores);
        if actual != self.rules.round_target {
            return Err(ValidationError::SumMismatch {
                expected: self.rules.round_target,
                actual,
            });
        }

        let win_threshold = self.rules.win_threshold;
        let winner = match self.get_mut(id) {
            Some(game) => {
                game.rounds.push(Round(scores));
                let totals = score::totals(game);
                score::find_winner(&totals, win_threshold).map(|index| Winner {
                    index,
                    name: game.players[index].clone(),
                    total: totals[index],
                })
            }
            None => return Ok(None),
        };

        self.persist();
        self.emit_match(emitter::ROUND_ADDED, id);
        if let Some(winner) = &winner {
            self.emit(emitter::WINNER_DETECTED, winner.name.clone());
        }

        Ok(Some(RoundAccepted { winner }))
    }

    /// Request deletion of one round. Returns None for an unknown match or
    /// an out-of-bounds index.
    pub fn request_delete_round(&self, id: MatchId, index: usize) -> Option<Confirmation> {
        let game = self.get(id)?;
        if index >= game.rounds.len() {
            return None;
        }
        Some(Confirmation::new(Action::DeleteRound {
            match_id: id,
            index,
        }))
    }

    /// Request clearing all rounds of a match, keeping players and id.
    pub fn request_reset(&self, id: MatchId) -> Option<Confirmation> {
        self.get(id)?;
        Some(Confirmation::new(Action::ResetMatch { match_id: id }))
    }

    /// Request wiping the whole history.
    pub fn request_clear_all(&self) -> Confirmation {
        Confirmation::new(Action::ClearAll)
    }

    /// Apply a confirmed destructive action. A token whose target has gone
    /// away since the request is a no-op.
    pub fn confirm(&mut self, confirmation: Confirmation) {
        match confirmation.action {
            Action::DeleteRound { match_id, index } => {
                let deleted = match self.get_mut(match_id) {
                    Some(game) if index < game.rounds.len() => {
                        game.rounds.remove(index);
                        true
                    }
                    _ => false,
                };
                if deleted {
                    self.persist();
                    self.emit_match(emitter::ROUND_DELETED, match_id);
                }
            }
            Action::ResetMatch { match_id } => {
                let reset = match self.get_mut(match_id) {
                    Some(game) => {
                        game.rounds.clear();
                        true
                    }
                    None => false,
                };
                if reset {
                    self.persist();
                    self.emit_match(emitter::MATCH_RESET, match_id);
                }
            }
            Action::ClearAll => {
                self.games.clear();
                self.current = None;
                self.persist();
                self.emit(emitter::HISTORY_CLEARED, String::new());
            }
        }
    }

    /// Select the active match. An unknown id clears the selection, leaving
    /// the host on its setup view.
    pub fn set_active(&mut self, id: MatchId) -> Option<&Match> {
        self.current = if self.get(id).is_some() {
            Some(id)
        } else {
            None
        };
        self.persist();
        self.active()
    }

    /// Register a listener on the notification port.
    #[cfg(feature = "emitter")]
    pub fn on<F>(&mut self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }

    fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.games.iter_mut().find(|game| game.id == id)
    }

    fn persist(&self) {
        if let Err(err) = self.save() {
            warn!("failed to persist scoreboard state: {}", err);
        }
    }

    #[cfg(feature = "emitter")]
    fn emit(&mut self, event: &str, payload: String) {
        self.emitter.emit(event, payload);
    }

    #[cfg(not(feature = "emitter"))]
    fn emit(&mut self, _event: &str, _payload: String) {}

    #[cfg(feature = "emitter")]
    fn emit_match(&mut self, event: &str, id: MatchId) {
        let payload = self.get(id).and_then(|game| serde_json::to_string(game).ok());
        if let Some(payload) = payload {
            self.emitter.emit(event, payload);
        }
    }

    #[cfg(not(feature = "emitter"))]
    fn emit_match(&mut self, _event: &str, _id: MatchId) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn names() -> [String; PLAYER_COUNT] {
        ["A", "B", "C", "D"].map(String::from)
    }

    fn store() -> MatchStore<MemoryStore> {
        MatchStore::new(MemoryStore::new())
    }

    #[test]
    fn create_match_becomes_active_and_goes_first() {
        let mut store = store();
        let first = store.create_match(names()).unwrap();
        let second = store
            .create_match(["E", "F", "G", "H"].map(String::from))
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(store.matches().len(), 2);
        assert_eq!(store.matches()[0].id, second);
        assert_eq!(store.current_id(), Some(second));
        assert_eq!(store.active().unwrap().players[0], "E");
    }

    #[test]
    fn create_match_trims_names() {
        let mut store = store();
        let id = store
            .create_match(["  A  ", "B", "C", "D"].map(String::from))
            .unwrap();
        assert_eq!(store.get(id).unwrap().players[0], "A");
    }

    #[test]
    fn create_match_rejects_blank_name() {
        let mut store = store();
        let err = store
            .create_match(["A", "   ", "C", "D"].map(String::from))
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyPlayerName { position: 1 });
        assert!(store.matches().is_empty());
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn append_round_rejects_wrong_sum() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();

        let err = store.append_round(id, [90, 90, 90, 80]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SumMismatch {
                expected: 360,
                actual: 350
            }
        );
        assert_eq!(store.get(id).unwrap().round_count(), 0);
    }

    #[test]
    fn append_round_updates_totals() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();

        let accepted = store.append_round(id, [100, 80, 90, 90]).unwrap().unwrap();
        assert!(accepted.winner.is_none());
        assert_eq!(store.totals_for(id).unwrap(), [100, 80, 90, 90]);

        store.append_round(id, [50, 120, 100, 90]).unwrap();
        assert_eq!(store.totals_for(id).unwrap(), [150, 200, 190, 180]);
    }

    #[test]
    fn append_round_to_unknown_match_is_a_noop() {
        let mut store = store();
        let result = store
            .append_round(MatchId::from_millis(42), [90, 90, 90, 90])
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn winner_detected_only_at_threshold() {
        let mut store = MatchStore::with_rules(
            MemoryStore::new(),
            Rules {
                round_target: 1000,
                win_threshold: 1000,
            },
        );
        let id = store.create_match(names()).unwrap();

        for _ in 0..3 {
            let accepted = store
                .append_round(id, [250, 250, 250, 250])
                .unwrap()
                .unwrap();
            assert!(accepted.winner.is_none());
        }
        assert_eq!(store.totals_for(id).unwrap(), [750, 750, 750, 750]);

        let accepted = store.append_round(id, [250, 250, 0, 500]).unwrap().unwrap();
        let winner = accepted.winner.unwrap();
        assert_eq!(winner.index, 3);
        assert_eq!(winner.name, "D");
        assert_eq!(winner.total, 1250);
        assert_eq!(store.totals_for(id).unwrap(), [1000, 1000, 750, 1250]);
    }

    #[test]
    fn delete_round_shifts_later_rounds() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();
        store.append_round(id, [360, 0, 0, 0]).unwrap();
        store.append_round(id, [0, 360, 0, 0]).unwrap();
        store.append_round(id, [0, 0, 360, 0]).unwrap();

        let confirmation = store.request_delete_round(id, 1).unwrap();
        assert_eq!(confirmation.describe(), "Delete this round?");
        store.confirm(confirmation);

        let game = store.get(id).unwrap();
        assert_eq!(game.round_count(), 2);
        assert_eq!(game.rounds[0], Round([360, 0, 0, 0]));
        assert_eq!(game.rounds[1], Round([0, 0, 360, 0]));
    }

    #[test]
    fn delete_request_rejects_out_of_bounds_index() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();
        store.append_round(id, [90, 90, 90, 90]).unwrap();

        assert!(store.request_delete_round(id, 1).is_none());
        assert!(store
            .request_delete_round(MatchId::from_millis(42), 0)
            .is_none());
    }

    #[test]
    fn dropping_a_confirmation_cancels() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();
        store.append_round(id, [90, 90, 90, 90]).unwrap();

        let confirmation = store.request_delete_round(id, 0).unwrap();
        drop(confirmation);
        assert_eq!(store.get(id).unwrap().round_count(), 1);
    }

    #[test]
    fn reset_keeps_players_and_id() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();
        store.append_round(id, [90, 90, 90, 90]).unwrap();

        let confirmation = store.request_reset(id).unwrap();
        store.confirm(confirmation);

        let game = store.get(id).unwrap();
        assert_eq!(game.id, id);
        assert_eq!(game.players[0], "A");
        assert_eq!(game.round_count(), 0);
        assert_eq!(store.current_id(), Some(id));
    }

    #[test]
    fn clear_all_empties_collection_and_selection() {
        let mut store = store();
        store.create_match(names()).unwrap();

        let confirmation = store.request_clear_all();
        assert_eq!(confirmation.describe(), "Delete all history?");
        store.confirm(confirmation);

        assert!(store.matches().is_empty());
        assert_eq!(store.current_id(), None);
        assert!(store.active().is_none());
    }

    #[test]
    fn set_active_unknown_id_clears_selection() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();

        assert!(store.set_active(MatchId::from_millis(42)).is_none());
        assert_eq!(store.current_id(), None);

        assert!(store.set_active(id).is_some());
        assert_eq!(store.current_id(), Some(id));
    }

    #[test]
    fn stale_confirmation_is_a_noop() {
        let mut store = store();
        let id = store.create_match(names()).unwrap();
        store.append_round(id, [90, 90, 90, 90]).unwrap();

        let delete = store.request_delete_round(id, 0).unwrap();
        let reset = store.request_reset(id).unwrap();
        store.confirm(reset);

        // The round is already gone; the stale delete token does nothing.
        store.confirm(delete);
        assert_eq!(store.get(id).unwrap().round_count(), 0);
    }
}
