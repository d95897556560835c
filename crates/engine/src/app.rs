//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{
    ClockPort, ExtractionPort, ProjectGenerator, ResponseRenderer, SessionStore,
};
use crate::use_cases;
use crate::use_cases::conversation::{HandleMessage, HandleUndo};
use crate::use_cases::games::ListGames;
use crate::use_cases::session::{GetSession, ResetSession};

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub conversation: use_cases::ConversationUseCases,
    pub session: use_cases::SessionUseCases,
    pub games: use_cases::GameUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        extraction: Arc<dyn ExtractionPort>,
        renderer: Arc<dyn ResponseRenderer>,
        generator: Arc<dyn ProjectGenerator>,
        clock: Arc<dyn ClockPort>,
        max_suggestions: usize,
    ) -> Self {
        let conversation = use_cases::ConversationUseCases::new(
            Arc::new(HandleMessage::new(
                sessions.clone(),
                extraction,
                renderer.clone(),
                generator.clone(),
                clock.clone(),
                max_suggestions,
            )),
            Arc::new(HandleUndo::new(
                sessions.clone(),
                renderer.clone(),
                clock,
                max_suggestions,
            )),
        );

        let session = use_cases::SessionUseCases::new(
            Arc::new(GetSession::new(
                sessions.clone(),
                renderer.clone(),
                max_suggestions,
            )),
            Arc::new(ResetSession::new(sessions, renderer, max_suggestions)),
        );

        let games = use_cases::GameUseCases::new(Arc::new(ListGames::new(generator)));

        Self {
            use_cases: UseCases {
                conversation,
                session,
                games,
            },
        }
    }
}
