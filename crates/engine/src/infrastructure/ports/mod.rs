//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Session storage (in-memory today, could move to Redis)
//! - Extraction strategy (rules or LLM)
//! - LLM calls (could swap Ollama -> other OpenAI-compatible servers)
//! - Response rendering and project generation
//! - Clock (for testing)

mod error;
mod external;
mod sessions;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    ChatMessage, ExtractionPort, ExtractionRequest, FinishReason, GeneratedProject, LlmPort,
    LlmRequest, LlmResponse, MessageRole, ProjectGenerator, ResponseRenderer, TokenUsage,
};

#[cfg(test)]
pub use external::{
    MockExtractionPort, MockLlmPort, MockProjectGenerator, MockResponseRenderer,
};

// =============================================================================
// Session Storage
// =============================================================================
pub use sessions::{SessionLease, SessionStore};

#[cfg(test)]
pub use sessions::MockSessionStore;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{ExtractionError, GenerationError, LlmError, StoreError};
