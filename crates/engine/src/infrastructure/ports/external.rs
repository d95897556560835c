//! External collaborator port traits (LLM, extraction, rendering, project generation).

use async_trait::async_trait;
use gamecraft_domain::{ConversationState, GameSpecification, HistoryTurn, Intent, TurnAnalysis};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::error::{ExtractionError, GenerationError, LlmError};

// =============================================================================
// LLM Types
// =============================================================================

/// LLM request/response types
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The conversation history
    pub messages: Vec<ChatMessage>,
    /// System prompt / context
    pub system_prompt: Option<String>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Ask the backend for a JSON object answer
    pub json_mode: bool,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// A message in the conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
    /// Finish reason
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Option<TokenUsage>,
}

/// Reason the generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    #[serde(other)]
    Unknown,
}

/// Token usage information
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Extraction
// =============================================================================

/// Everything an extraction strategy may look at for one message.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub message: String,
    pub state: ConversationState,
    pub spec: Arc<GameSpecification>,
    /// Most recent turns, oldest first
    pub history: Vec<HistoryTurn>,
}

/// Turns a message into an intent plus specification updates.
///
/// The rule-based and LLM-backed strategies are interchangeable; nothing
/// downstream knows which one produced the analysis.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtractionPort: Send + Sync {
    async fn analyze(&self, request: ExtractionRequest) -> Result<TurnAnalysis, ExtractionError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

// =============================================================================
// Response Rendering
// =============================================================================

/// Pure, template-based assistant replies.
#[cfg_attr(test, mockall::automock)]
pub trait ResponseRenderer: Send + Sync {
    fn render(&self, state: ConversationState, intent: Intent, spec: &GameSpecification) -> String;

    fn render_generated(&self, spec: &GameSpecification, project: &GeneratedProject) -> String;

    fn render_generation_failed(&self, spec: &GameSpecification, reason: &str) -> String;

    fn render_undo(&self, undone: bool, state: ConversationState, spec: &GameSpecification)
        -> String;

    /// Longer guidance for the current state; empty when there is none.
    fn help_text(&self, state: ConversationState, spec: &GameSpecification) -> String;
}

// =============================================================================
// Project Generation
// =============================================================================

/// A project written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    pub name: String,
    pub path: PathBuf,
    /// Paths relative to `path`
    pub files: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectGenerator: Send + Sync {
    /// Write a project for `spec`, replacing any earlier project of the same name.
    async fn generate(&self, spec: &GameSpecification) -> Result<GeneratedProject, GenerationError>;

    /// Names of the projects generated so far, sorted.
    async fn list_projects(&self) -> Result<Vec<String>, GenerationError>;
}
