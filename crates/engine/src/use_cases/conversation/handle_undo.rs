//! Undo the most recent turn of a session.

use std::sync::Arc;

use gamecraft_domain::{ConversationState, DomainError, GameSpecification, SessionId, Suggestion};

use super::ConversationError;
use crate::infrastructure::ports::{ClockPort, ResponseRenderer, SessionStore};

#[derive(Debug, Clone)]
pub struct UndoApplied {
    pub reply: String,
    /// False when there was nothing to undo; the session is then unchanged
    pub undone: bool,
    pub state: ConversationState,
    pub spec: Arc<GameSpecification>,
    pub suggestions: Vec<Suggestion>,
    pub can_undo: bool,
}

pub struct HandleUndo {
    sessions: Arc<dyn SessionStore>,
    renderer: Arc<dyn ResponseRenderer>,
    clock: Arc<dyn ClockPort>,
    max_suggestions: usize,
}

impl HandleUndo {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        renderer: Arc<dyn ResponseRenderer>,
        clock: Arc<dyn ClockPort>,
        max_suggestions: usize,
    ) -> Self {
        Self {
            sessions,
            renderer,
            clock,
            max_suggestions,
        }
    }

    pub async fn execute(&self, session_id: &SessionId) -> Result<UndoApplied, ConversationError> {
        let mut lease = self.sessions.get_or_create(session_id).await?;

        let undone = match lease.undo(self.clock.now()) {
            Ok(()) => true,
            Err(DomainError::NothingToUndo) => false,
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            session_id = %session_id,
            undone,
            state = %lease.state(),
            remaining = lease.snapshot_count(),
            "Undo"
        );

        let applied = UndoApplied {
            reply: self.renderer.render_undo(undone, lease.state(), lease.spec()),
            undone,
            state: lease.state(),
            spec: lease.spec_arc(),
            suggestions: lease.suggestions(self.max_suggestions),
            can_undo: lease.can_undo(),
        };
        self.sessions.save(lease).await?;
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockResponseRenderer, SessionStore};
    use crate::infrastructure::session_store::InMemorySessionStore;
    use chrono::{TimeZone, Utc};
    use gamecraft_domain::analyze_turn;
    use mockall::predicate::*;

    fn id() -> SessionId {
        SessionId::new("undo-me").unwrap()
    }

    fn setup(renderer: MockResponseRenderer) -> (Arc<InMemorySessionStore>, HandleUndo) {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()));
        let sessions = Arc::new(InMemorySessionStore::new(clock.clone()));
        let use_case = HandleUndo::new(sessions.clone(), Arc::new(renderer), clock, 6);
        (sessions, use_case)
    }

    #[tokio::test]
    async fn empty_stack_is_reported_not_failed() {
        let mut renderer = MockResponseRenderer::new();
        renderer
            .expect_render_undo()
            .with(eq(false), eq(ConversationState::Greeting), always())
            .times(1)
            .returning(|_, _, _| "Nothing to undo.".to_string());
        let (_, use_case) = setup(renderer);

        let applied = use_case.execute(&id()).await.unwrap();
        assert!(!applied.undone);
        assert!(!applied.can_undo);
        assert_eq!(applied.reply, "Nothing to undo.");
        assert_eq!(*applied.spec, GameSpecification::default());
    }

    #[tokio::test]
    async fn undo_restores_previous_turn() {
        let mut renderer = MockResponseRenderer::new();
        renderer
            .expect_render_undo()
            .with(eq(true), eq(ConversationState::Greeting), always())
            .returning(|_, _, _| "Undone!".to_string());
        let (sessions, use_case) = setup(renderer);

        {
            let mut lease = sessions.get_or_create(&id()).await.unwrap();
            let message = "I want a dark fantasy platformer with no enemies";
            let now = lease.updated_at();
            let analysis = analyze_turn(message, lease.state());
            lease.process_turn(message, analysis, now);
            lease.record_reply("summary", now);
            sessions.save(lease).await.unwrap();
        }

        let applied = use_case.execute(&id()).await.unwrap();
        assert!(applied.undone);
        assert_eq!(applied.state, ConversationState::Greeting);
        assert_eq!(*applied.spec, GameSpecification::default());
        assert!(!applied.can_undo);

        let lease = sessions.get_or_create(&id()).await.unwrap();
        assert!(lease.history().is_empty());
    }
}
