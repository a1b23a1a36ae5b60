use crate::game::MatchId;

/// What a confirmation token will do when confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    DeleteRound { match_id: MatchId, index: usize },
    ResetMatch { match_id: MatchId },
    ClearAll,
}

/// Pending destructive action.
///
/// Destructive operations are a two-step protocol: `request_*` returns a
/// token describing the action, the UI shows `describe()` as its prompt, and
/// `MatchStore::confirm` consumes the token to apply the effect. Dropping
/// the token cancels; a consumed token cannot be replayed.
#[derive(Debug)]
pub struct Confirmation {
    pub(crate) action: Action,
}

impl Confirmation {
    pub(crate) fn new(action: Action) -> Self {
        Confirmation { action }
    }

    /// Prompt text for the confirmation dialog.
    pub fn describe(&self) -> &'static str {
        match self.action {
            Action::DeleteRound { .. } => "Delete this round?",
            Action::ResetMatch { .. } => {
                "Are you sure you want to reset the scores for this match? Players will remain."
            }
            Action::ClearAll => "Delete all history?",
        }
    }

    /// The match this action applies to, if it targets one.
    pub fn match_id(&self) -> Option<MatchId> {
        match self.action {
            Action::DeleteRound { match_id, .. } | Action::ResetMatch { match_id } => {
                Some(match_id)
            }
            Action::ClearAll => None,
        }
    }
}
