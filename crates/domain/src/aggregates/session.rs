//! Session aggregate - one user's game-creation conversation
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: state only changes through the turn pipeline, undo and reset
//! - **Copy-on-write spec**: the specification lives behind an `Arc`; a
//!   [`Snapshot`] holds its own `Arc` and mutation goes through
//!   `Arc::make_mut`, so a snapshot can never observe a later change
//! - **Mutations return outcomes**: `process_turn` reports what happened

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::aggregates::GameSpecification;
use crate::conversation::{suggest, transition, ConversationState, Intent, Suggestion, TurnAnalysis};
use crate::error::DomainError;
use crate::ids::SessionId;

/// Undo depth; the oldest snapshot is evicted beyond this.
pub const MAX_UNDO_DEPTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: TurnRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl HistoryTurn {
    pub fn user(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
            at,
        }
    }

    pub fn assistant(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
            at,
        }
    }
}

/// Session state captured before a message is processed.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: ConversationState,
    spec: Arc<GameSpecification>,
    history_len: usize,
}

impl Snapshot {
    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn spec(&self) -> &GameSpecification {
        &self.spec
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }
}

/// What a processed turn did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub intent: Intent,
    pub previous_state: ConversationState,
    pub state: ConversationState,
    /// The turn was a start-over and the session is back to its defaults
    pub reset: bool,
}

impl TurnOutcome {
    pub fn starts_generation(&self) -> bool {
        self.state == ConversationState::Generating
            && self.previous_state != ConversationState::Generating
    }
}

/// A game-creation conversation.
///
/// # Invariants
///
/// - At most [`MAX_UNDO_DEPTH`] snapshots are kept
/// - `revision` increases on every mutation
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    state: ConversationState,
    spec: Arc<GameSpecification>,
    history: Vec<HistoryTurn>,
    snapshots: VecDeque<Snapshot>,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            state: ConversationState::Greeting,
            spec: Arc::new(GameSpecification::default()),
            history: Vec::new(),
            snapshots: VecDeque::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn spec(&self) -> &GameSpecification {
        &self.spec
    }

    /// Shared handle to the current specification.
    pub fn spec_arc(&self) -> Arc<GameSpecification> {
        Arc::clone(&self.spec)
    }

    pub fn history(&self) -> &[HistoryTurn] {
        &self.history
    }

    /// The most recent `count` turns, oldest first.
    pub fn recent_history(&self, count: usize) -> &[HistoryTurn] {
        let start = self.history.len().saturating_sub(count);
        &self.history[start..]
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn suggestions(&self, max_count: usize) -> Vec<Suggestion> {
        suggest(self.state, &self.spec, max_count)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Run one user message through the pipeline: snapshot, record the user
    /// turn, apply the extracted fields, then transition.
    ///
    /// A start-over intent resets the session instead of applying anything.
    pub fn process_turn(
        &mut self,
        message: &str,
        analysis: TurnAnalysis,
        now: DateTime<Utc>,
    ) -> TurnOutcome {
        let previous_state = self.state;
        self.push_snapshot();
        self.history.push(HistoryTurn::user(message, now));

        let TurnAnalysis { intent, update } = analysis;
        let reset = intent == Intent::StartOver;
        if reset {
            self.clear();
        } else {
            if !update.is_empty() {
                update.apply_to(Arc::make_mut(&mut self.spec));
            }
            self.state = transition(self.state, intent, &self.spec);
        }

        self.touch(now);
        TurnOutcome {
            intent,
            previous_state,
            state: self.state,
            reset,
        }
    }

    /// Append the assistant's reply to the history.
    pub fn record_reply(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.history.push(HistoryTurn::assistant(text, now));
        self.touch(now);
    }

    /// Restore the state before the most recent message.
    ///
    /// Undo is not itself undoable.
    pub fn undo(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let snapshot = self.snapshots.pop_back().ok_or(DomainError::NothingToUndo)?;
        self.state = snapshot.state;
        self.spec = snapshot.spec;
        self.history.truncate(snapshot.history_len);
        self.touch(now);
        Ok(())
    }

    /// Back to Greeting with a fresh specification, no history and no snapshots.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.clear();
        self.touch(now);
    }

    /// Generating -> Complete. Returns false if the session had moved on.
    pub fn complete_generation(&mut self, now: DateTime<Utc>) -> bool {
        self.leave_generating(ConversationState::Complete, now)
    }

    /// Generating -> Confirming after the generator failed.
    pub fn abort_generation(&mut self, now: DateTime<Utc>) -> bool {
        self.leave_generating(ConversationState::Confirming, now)
    }

    fn leave_generating(&mut self, next: ConversationState, now: DateTime<Utc>) -> bool {
        if self.state != ConversationState::Generating {
            return false;
        }
        self.state = next;
        self.touch(now);
        true
    }

    fn push_snapshot(&mut self) {
        self.snapshots.push_back(Snapshot {
            state: self.state,
            spec: Arc::clone(&self.spec),
            history_len: self.history.len(),
        });
        while self.snapshots.len() > MAX_UNDO_DEPTH {
            self.snapshots.pop_front();
        }
    }

    fn clear(&mut self) {
        self.state = ConversationState::Greeting;
        self.spec = Arc::new(GameSpecification::default());
        self.history.clear();
        self.snapshots.clear();
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.revision += 1;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::analyze_turn;
    use crate::value_objects::Genre;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn session() -> Session {
        Session::new(SessionId::new("s-1").unwrap(), now())
    }

    fn send(session: &mut Session, message: &str) -> TurnOutcome {
        let analysis = analyze_turn(message, session.state());
        let outcome = session.process_turn(message, analysis, now());
        session.record_reply("ok", now());
        outcome
    }

    #[test]
    fn new_session_starts_at_greeting_with_defaults() {
        let s = session();
        assert_eq!(s.state(), ConversationState::Greeting);
        assert_eq!(s.spec(), &GameSpecification::default());
        assert!(s.history().is_empty());
        assert!(!s.can_undo());
    }

    #[test]
    fn scenario_greeting_to_generating() {
        let mut s = session();

        let out = send(&mut s, "I want a dark fantasy platformer with no enemies");
        assert_eq!(out.intent, Intent::DescribeGame);
        assert_eq!(s.state(), ConversationState::DetailGathering);
        assert_eq!(s.spec().genre, Genre::Platformer);
        assert_eq!(s.spec().theme, "Fantasy");
        assert!(!s.spec().has_enemies);

        let out = send(&mut s, "ready");
        assert_eq!(out.intent, Intent::Ready);
        assert_eq!(s.state(), ConversationState::Confirming);

        let out = send(&mut s, "yes");
        assert_eq!(out.intent, Intent::ConfirmYes);
        assert_eq!(s.state(), ConversationState::Generating);
        assert!(out.starts_generation());
    }

    #[test]
    fn undo_restores_state_spec_and_history() {
        let mut s = session();
        send(&mut s, "a racing game");
        let state_before = s.state();
        let spec_before = s.spec().clone();
        let history_before = s.history().len();

        send(&mut s, "make it cyberpunk with red enemies");
        assert_ne!(s.spec(), &spec_before);

        s.undo(now()).unwrap();
        assert_eq!(s.state(), state_before);
        assert_eq!(s.spec(), &spec_before);
        assert_eq!(s.history().len(), history_before);
    }

    #[test]
    fn undo_on_empty_stack_changes_nothing() {
        let mut s = session();
        let revision = s.revision();
        assert_eq!(s.undo(now()), Err(DomainError::NothingToUndo));
        assert_eq!(s.revision(), revision);
        assert_eq!(s.state(), ConversationState::Greeting);
    }

    #[test]
    fn snapshot_stack_is_bounded() {
        let mut s = session();
        for i in 0..25 {
            send(&mut s, &format!("message number {i}"));
        }
        assert_eq!(s.snapshot_count(), MAX_UNDO_DEPTH);

        for _ in 0..MAX_UNDO_DEPTH {
            s.undo(now()).unwrap();
        }
        assert!(!s.can_undo());
        // The five oldest snapshots were evicted: 5 user + 5 assistant turns remain.
        assert_eq!(s.history().len(), 10);
    }

    #[test]
    fn snapshot_never_sees_later_mutation() {
        let mut s = session();
        send(&mut s, "a racing game");
        let captured = s.snapshots().last().map(|snap| snap.spec().clone()).unwrap();

        send(&mut s, "a puzzle game called \"Blocks\"");
        send(&mut s, "make it hard");

        let first = s.snapshots().next().unwrap();
        assert_eq!(first.spec(), &GameSpecification::default());
        assert_eq!(first.history_len(), 0);
        assert_eq!(captured, GameSpecification::default());
    }

    #[test]
    fn start_over_resets_everything() {
        let mut s = session();
        send(&mut s, "I want a dark fantasy platformer with no enemies");
        send(&mut s, "ready");
        assert_eq!(s.state(), ConversationState::Confirming);

        let analysis = analyze_turn("start over", s.state());
        let out = s.process_turn("start over", analysis, now());
        assert!(out.reset);
        assert_eq!(out.intent, Intent::StartOver);
        assert_eq!(s.state(), ConversationState::Greeting);
        assert_eq!(s.spec(), &GameSpecification::default());
        assert!(s.history().is_empty());
        assert!(!s.can_undo());
    }

    #[test]
    fn generation_completes_or_falls_back() {
        let mut s = session();
        send(&mut s, "a racing game");
        assert!(!s.complete_generation(now()));

        send(&mut s, "generate it");
        assert_eq!(s.state(), ConversationState::Generating);
        assert!(s.complete_generation(now()));
        assert_eq!(s.state(), ConversationState::Complete);

        let mut s = session();
        send(&mut s, "a racing game");
        send(&mut s, "generate it");
        assert!(s.abort_generation(now()));
        assert_eq!(s.state(), ConversationState::Confirming);
    }

    #[test]
    fn recent_history_returns_the_tail() {
        let mut s = session();
        send(&mut s, "hello");
        send(&mut s, "a racing game");
        let tail = s.recent_history(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].role, TurnRole::Assistant);
        assert_eq!(tail[1].text, "a racing game");
        assert_eq!(s.recent_history(100).len(), 4);
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut s = session();
        let r0 = s.revision();
        send(&mut s, "hello");
        let r1 = s.revision();
        assert!(r1 > r0);
        s.undo(now()).unwrap();
        assert!(s.revision() > r1);
    }
}
