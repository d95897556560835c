//! Handle message use case.
//!
//! Runs one user message through the conversation pipeline:
//! 1. Read the session and release it
//! 2. Ask the extraction strategy for an intent and field updates
//! 3. Re-lock, apply the turn atomically and render the reply
//! 4. If the turn started generation, release, build the project, re-lock
//!    and move the session to Complete (or back to Confirming on failure)

use std::sync::Arc;

use gamecraft_domain::{
    analyze_turn, ConversationState, DomainError, GameSpecification, Intent, SessionId,
    Suggestion, TurnAnalysis,
};

use crate::infrastructure::extraction::LLM_HISTORY_TURNS;
use crate::infrastructure::ports::{
    ClockPort, ExtractionPort, ExtractionRequest, GeneratedProject, ProjectGenerator,
    ResponseRenderer, SessionLease, SessionStore, StoreError,
};

/// Result of handling one message.
#[derive(Debug, Clone)]
pub struct MessageHandled {
    /// Rendered assistant reply
    pub reply: String,
    pub intent: Intent,
    pub state: ConversationState,
    pub spec: Arc<GameSpecification>,
    pub suggestions: Vec<Suggestion>,
    pub can_undo: bool,
    /// Set when this message produced a project on disk
    pub project: Option<GeneratedProject>,
}

impl MessageHandled {
    pub fn game_ready(&self) -> bool {
        self.state == ConversationState::Complete
    }
}

/// Handle message use case.
///
/// Orchestrates: session lookup, extraction, the domain turn, reply rendering
/// and project generation.
pub struct HandleMessage {
    sessions: Arc<dyn SessionStore>,
    extraction: Arc<dyn ExtractionPort>,
    renderer: Arc<dyn ResponseRenderer>,
    generator: Arc<dyn ProjectGenerator>,
    clock: Arc<dyn ClockPort>,
    max_suggestions: usize,
}

impl HandleMessage {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        extraction: Arc<dyn ExtractionPort>,
        renderer: Arc<dyn ResponseRenderer>,
        generator: Arc<dyn ProjectGenerator>,
        clock: Arc<dyn ClockPort>,
        max_suggestions: usize,
    ) -> Self {
        Self {
            sessions,
            extraction,
            renderer,
            generator,
            clock,
            max_suggestions,
        }
    }

    pub async fn execute(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<MessageHandled, ConversationError> {
        let message = message.trim();

        // 1. Capture what the extraction strategy needs, then let go of the session.
        let (request, seen_revision) = {
            let lease = self.sessions.get_or_create(session_id).await?;
            let request = ExtractionRequest {
                message: message.to_string(),
                state: lease.state(),
                spec: lease.spec_arc(),
                history: lease.recent_history(LLM_HISTORY_TURNS).to_vec(),
            };
            (request, lease.revision())
        };
        let seen_state = request.state;

        // 2. Extraction may await I/O; no lock is held here.
        let analysis = match self.extraction.analyze(request).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    strategy = self.extraction.name(),
                    error = %e,
                    "Extraction failed, falling back to rules"
                );
                analyze_turn(message, seen_state)
            }
        };

        // 3. Apply the turn under the lock.
        let mut lease = self.sessions.get_or_create(session_id).await?;
        let analysis = if lease.revision() == seen_revision {
            analysis
        } else {
            tracing::debug!(
                session_id = %session_id,
                "Session changed during extraction, re-analysing"
            );
            analyze_turn(message, lease.state())
        };

        let outcome = self.apply_turn(&mut lease, message, analysis);
        if !outcome.starts_generation {
            let handled = self.snapshot_result(&lease, outcome.reply, outcome.intent, None);
            self.sessions.save(lease).await?;
            return Ok(handled);
        }

        // 4. Generation runs outside the lock.
        let spec = lease.spec_arc();
        self.sessions.save(lease).await?;

        tracing::info!(session_id = %session_id, game = %spec.name, "Generating project");
        let generated = self.generator.generate(&spec).await;

        // Turns that arrive meanwhile may edit the spec; the build still finishes the
        // session. Only an undo or start-over that left Generating keeps its state.
        let mut lease = self.sessions.get_or_create(session_id).await?;
        let now = self.clock.now();

        let (reply, project) = match generated {
            Ok(project) => {
                let reply = self.renderer.render_generated(&spec, &project);
                if lease.complete_generation(now) {
                    lease.record_reply(reply.clone(), now);
                } else {
                    tracing::warn!(
                        session_id = %session_id,
                        state = %lease.state().as_str(),
                        "Session left Generating before the project was written"
                    );
                }
                (reply, Some(project))
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Project generation failed");
                let reply = self.renderer.render_generation_failed(&spec, &e.to_string());
                if lease.abort_generation(now) {
                    lease.record_reply(reply.clone(), now);
                }
                (reply, None)
            }
        };

        let handled = self.snapshot_result(&lease, reply, outcome.intent, project);
        self.sessions.save(lease).await?;
        Ok(handled)
    }

    fn apply_turn(&self, lease: &mut SessionLease, message: &str, analysis: TurnAnalysis) -> Applied {
        let now = self.clock.now();
        let fields = analysis.update.touched_fields();
        let outcome = lease.process_turn(message, analysis, now);

        tracing::info!(
            session_id = %lease.id(),
            intent = %outcome.intent,
            from = %outcome.previous_state.as_str(),
            to = %outcome.state.as_str(),
            fields = ?fields,
            "Turn applied"
        );

        let reply = self.renderer.render(outcome.state, outcome.intent, lease.spec());
        // A start-over leaves the history empty.
        if !outcome.reset {
            lease.record_reply(reply.clone(), now);
        }

        Applied {
            reply,
            intent: outcome.intent,
            starts_generation: outcome.starts_generation(),
        }
    }

    fn snapshot_result(
        &self,
        lease: &SessionLease,
        reply: String,
        intent: Intent,
        project: Option<GeneratedProject>,
    ) -> MessageHandled {
        MessageHandled {
            reply,
            intent,
            state: lease.state(),
            spec: lease.spec_arc(),
            suggestions: lease.suggestions(self.max_suggestions),
            can_undo: lease.can_undo(),
            project,
        }
    }
}

struct Applied {
    reply: String,
    intent: Intent,
    starts_generation: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}
