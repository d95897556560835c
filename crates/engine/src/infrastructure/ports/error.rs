//! Error types for port operations.

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures of an extraction strategy. Callers fall back to the rule-based
/// analysis; the conversation never fails because of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractionError {
    #[error("Extraction backend failed: {0}")]
    Backend(#[from] LlmError),
    #[error("Malformed extraction result: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Project I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not serialize specification: {0}")]
    Serialization(String),
    #[error("Invalid project name: {0:?}")]
    InvalidName(String),
}

impl GenerationError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}
