//! Response bodies of the chat HTTP API.

use serde::{Deserialize, Serialize};

pub use gamecraft_domain::{
    ConversationState, GameSpecification, HistoryTurn, Intent, Suggestion,
};

// =============================================================================
// Conversation
// =============================================================================

/// Reply to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Rendered assistant reply (Markdown)
    pub message: String,
    pub state: ConversationState,
    pub intent: Intent,
    pub spec: GameSpecification,
    pub suggestions: Vec<Suggestion>,
    pub can_undo: bool,
    /// True once a project has been written for this session
    #[serde(default)]
    pub game_ready: bool,
    /// Directory of the generated project, when `game_ready`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

/// Reply to an undo request. An empty undo stack is not an error: `message`
/// says so and nothing changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoResponse {
    pub message: String,
    pub undone: bool,
    pub state: ConversationState,
    pub spec: GameSpecification,
    pub suggestions: Vec<Suggestion>,
    pub can_undo: bool,
}

/// Full view of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub state: ConversationState,
    pub spec: GameSpecification,
    pub suggestions: Vec<Suggestion>,
    pub can_undo: bool,
    pub history: Vec<HistoryTurn>,
    /// Guidance for the current state
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
}

// =============================================================================
// Projects
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamesResponse {
    pub games: Vec<String>,
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
