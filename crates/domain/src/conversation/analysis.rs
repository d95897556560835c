//! One user turn, classified and extracted.

use serde::{Deserialize, Serialize};

use crate::aggregates::SpecUpdate;
use crate::conversation::{classify_intent, extract_game_params, ConversationState, Intent};

/// What a single message means: the intent and the fields it sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAnalysis {
    pub intent: Intent,
    pub update: SpecUpdate,
}

impl TurnAnalysis {
    pub fn new(intent: Intent, update: SpecUpdate) -> Self {
        Self { intent, update }
    }
}

/// Rule-based analysis of a message. Extraction does not see the state.
pub fn analyze_turn(message: &str, state: ConversationState) -> TurnAnalysis {
    TurnAnalysis {
        intent: classify_intent(message, state),
        update: extract_game_params(message),
    }
}
