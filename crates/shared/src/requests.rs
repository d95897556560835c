use serde::{Deserialize, Serialize};

/// One user message for a session. Unknown session ids start a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoRequest {
    pub session_id: String,
}
