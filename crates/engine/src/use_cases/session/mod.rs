//! Session use cases.
//!
//! Read-only views of a session and an explicit reset.

use std::sync::Arc;

use gamecraft_domain::{
    ConversationState, GameSpecification, HistoryTurn, Session, SessionId, Suggestion,
};

use crate::infrastructure::ports::{ResponseRenderer, SessionStore};
use crate::use_cases::conversation::ConversationError;

/// Everything a client needs to redraw a session.
#[derive(Debug, Clone)]
pub struct SessionDetails {
    pub session_id: SessionId,
    pub state: ConversationState,
    pub spec: Arc<GameSpecification>,
    pub suggestions: Vec<Suggestion>,
    pub can_undo: bool,
    pub history: Vec<HistoryTurn>,
    /// Guidance for the current state; empty when there is none
    pub help: String,
}

fn describe(
    session: &Session,
    renderer: &dyn ResponseRenderer,
    max_suggestions: usize,
) -> SessionDetails {
    SessionDetails {
        session_id: session.id().clone(),
        state: session.state(),
        spec: session.spec_arc(),
        suggestions: session.suggestions(max_suggestions),
        can_undo: session.can_undo(),
        history: session.history().to_vec(),
        help: renderer.help_text(session.state(), session.spec()),
    }
}

pub struct GetSession {
    sessions: Arc<dyn SessionStore>,
    renderer: Arc<dyn ResponseRenderer>,
    max_suggestions: usize,
}

impl GetSession {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        renderer: Arc<dyn ResponseRenderer>,
        max_suggestions: usize,
    ) -> Self {
        Self {
            sessions,
            renderer,
            max_suggestions,
        }
    }

    /// Unknown ids are created, like any other entry point.
    pub async fn execute(&self, session_id: &SessionId) -> Result<SessionDetails, ConversationError> {
        let lease = self.sessions.get_or_create(session_id).await?;
        let details = describe(&lease, self.renderer.as_ref(), self.max_suggestions);
        drop(lease);
        Ok(details)
    }
}

pub struct ResetSession {
    sessions: Arc<dyn SessionStore>,
    renderer: Arc<dyn ResponseRenderer>,
    max_suggestions: usize,
}

impl ResetSession {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        renderer: Arc<dyn ResponseRenderer>,
        max_suggestions: usize,
    ) -> Self {
        Self {
            sessions,
            renderer,
            max_suggestions,
        }
    }

    pub async fn execute(&self, session_id: &SessionId) -> Result<SessionDetails, ConversationError> {
        let lease = self.sessions.reset(session_id).await?;
        tracing::info!(session_id = %session_id, "Session reset");
        let details = describe(&lease, self.renderer.as_ref(), self.max_suggestions);
        self.sessions.save(lease).await?;
        Ok(details)
    }
}

/// Container for session use cases.
pub struct SessionUseCases {
    pub get: Arc<GetSession>,
    pub reset: Arc<ResetSession>,
}

impl SessionUseCases {
    pub fn new(get: Arc<GetSession>, reset: Arc<ResetSession>) -> Self {
        Self { get, reset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::session_store::InMemorySessionStore;
    use crate::infrastructure::templates::TemplateRenderer;
    use chrono::{TimeZone, Utc};
    use gamecraft_domain::analyze_turn;

    fn setup() -> (Arc<InMemorySessionStore>, GetSession, ResetSession) {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()));
        let sessions = Arc::new(InMemorySessionStore::new(clock));
        let renderer = Arc::new(TemplateRenderer::new());
        (
            sessions.clone(),
            GetSession::new(sessions.clone(), renderer.clone(), 4),
            ResetSession::new(sessions, renderer, 4),
        )
    }

    fn id() -> SessionId {
        SessionId::new("view").unwrap()
    }

    #[tokio::test]
    async fn fresh_session_view() {
        let (_, get, _) = setup();
        let details = get.execute(&id()).await.unwrap();

        assert_eq!(details.session_id, id());
        assert_eq!(details.state, ConversationState::Greeting);
        assert!(details.history.is_empty());
        assert!(details.suggestions.len() <= 4);
        assert!(details.help.contains("Getting Started"));
    }

    #[tokio::test]
    async fn reset_discards_progress() {
        let (sessions, get, reset) = setup();
        {
            let mut lease = sessions.get_or_create(&id()).await.unwrap();
            let message = "I want a dark fantasy platformer with no enemies";
            let now = lease.updated_at();
            let analysis = analyze_turn(message, lease.state());
            lease.process_turn(message, analysis, now);
            sessions.save(lease).await.unwrap();
        }
        assert_eq!(
            get.execute(&id()).await.unwrap().state,
            ConversationState::DetailGathering
        );

        let details = reset.execute(&id()).await.unwrap();
        assert_eq!(details.state, ConversationState::Greeting);
        assert!(!details.can_undo);
        assert_eq!(*details.spec, GameSpecification::default());
    }
}
