//! Conversation use cases.
//!
//! Handles the game-creation chat. Each message goes through extraction,
//! the domain state machine and the reply templates; undo rolls the session
//! back one message.

use std::sync::Arc;

mod handle_message;
mod handle_undo;

pub use handle_message::{ConversationError, HandleMessage, MessageHandled};
pub use handle_undo::{HandleUndo, UndoApplied};

/// Container for conversation use cases.
pub struct ConversationUseCases {
    pub handle_message: Arc<HandleMessage>,
    pub handle_undo: Arc<HandleUndo>,
}

impl ConversationUseCases {
    pub fn new(handle_message: Arc<HandleMessage>, handle_undo: Arc<HandleUndo>) -> Self {
        Self {
            handle_message,
            handle_undo,
        }
    }
}
