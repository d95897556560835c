//! Conversation state machine.
//!
//! `transition` is total: a (state, intent) pair with no table entry keeps the
//! current state. It never reports an invalid transition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregates::GameSpecification;
use crate::conversation::Intent;
use crate::error::DomainError;

/// Where a session is in the game-creation conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Greeting,
    GenreSelection,
    ThemeSelection,
    DetailGathering,
    Confirming,
    /// Entered on a generate command; the project generator moves it to Complete
    Generating,
    Complete,
}

impl ConversationState {
    pub fn all() -> &'static [ConversationState] {
        &[
            ConversationState::Greeting,
            ConversationState::GenreSelection,
            ConversationState::ThemeSelection,
            ConversationState::DetailGathering,
            ConversationState::Confirming,
            ConversationState::Generating,
            ConversationState::Complete,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Greeting => "greeting",
            ConversationState::GenreSelection => "genre_selection",
            ConversationState::ThemeSelection => "theme_selection",
            ConversationState::DetailGathering => "detail_gathering",
            ConversationState::Confirming => "confirming",
            ConversationState::Generating => "generating",
            ConversationState::Complete => "complete",
        }
    }

    /// States in which the user is still adding details and may ask to finish.
    pub fn is_gathering(&self) -> bool {
        matches!(
            self,
            ConversationState::DetailGathering | ConversationState::ThemeSelection
        )
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConversationState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConversationState::all()
            .iter()
            .copied()
            .find(|state| state.as_str() == s.trim())
            .ok_or_else(|| DomainError::parse(format!("Unknown conversation state: {}", s)))
    }
}

/// Compute the next state.
///
/// Rules, first match wins:
/// 1. `GenerateNow` goes to Generating from anywhere.
/// 2. `ConfirmYes` while Confirming goes to Generating.
/// 3. `ConfirmNo` while Confirming goes back to DetailGathering.
/// 4. Otherwise the per-state table; no entry keeps `current`.
///
/// `spec` is part of the contract so rules may inspect collected fields; the
/// current table does not need it.
pub fn transition(
    current: ConversationState,
    intent: Intent,
    _spec: &GameSpecification,
) -> ConversationState {
    use ConversationState as S;

    match (current, intent) {
        (_, Intent::GenerateNow) => S::Generating,
        (S::Confirming, Intent::ConfirmYes) => S::Generating,
        (S::Confirming, Intent::ConfirmNo) => S::DetailGathering,
        _ => table_entry(current, intent).unwrap_or(current),
    }
}

fn table_entry(current: ConversationState, intent: Intent) -> Option<ConversationState> {
    use ConversationState as S;

    let next = match (current, intent) {
        (S::Greeting, Intent::SelectGenre) => S::ThemeSelection,
        (S::Greeting, Intent::DescribeGame) => S::DetailGathering,
        (S::Greeting, Intent::GeneralChat) => S::GenreSelection,

        (S::GenreSelection, Intent::SelectGenre) => S::ThemeSelection,
        (S::GenreSelection, Intent::DescribeGame) => S::DetailGathering,

        (S::ThemeSelection, Intent::SetTheme) => S::DetailGathering,
        (S::ThemeSelection, Intent::DescribeGame) => S::DetailGathering,
        (S::ThemeSelection, Intent::Ready) => S::Confirming,

        (S::DetailGathering, Intent::AddDetail) => S::DetailGathering,
        (S::DetailGathering, Intent::DescribeGame) => S::DetailGathering,
        (S::DetailGathering, Intent::Ready) => S::Confirming,
        (S::DetailGathering, Intent::SetTheme) => S::DetailGathering,
        (S::DetailGathering, Intent::SelectGenre) => S::DetailGathering,

        (S::Complete, Intent::StartOver) => S::Greeting,
        (S::Complete, Intent::DescribeGame) => S::DetailGathering,

        _ => return None,
    };
    Some(next)
}
