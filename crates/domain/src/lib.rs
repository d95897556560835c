//! Gamecraft domain: the game specification model and the conversational
//! slot-filling core.
//!
//! Nothing in this crate performs I/O. Classification, extraction, the state
//! machine and the suggestion engine are pure functions; [`Session`] applies
//! their results and keeps the undo snapshots.

pub mod aggregates;
pub mod conversation;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    FeatureFlag, GameSpecification, HistoryTurn, Session, Snapshot, SpecUpdate, TurnOutcome,
    TurnRole, MAX_UNDO_DEPTH,
};
pub use conversation::{
    analyze_turn, classify_intent, extract_game_params, suggest, title_case, transition,
    word_count, ConversationState, Intent, Suggestion, TurnAnalysis,
    DEFAULT_MAX_SUGGESTIONS, DESCRIPTION_MIN_WORDS,
};
pub use error::DomainError;
pub use ids::SessionId;
pub use value_objects::{
    ColorRole, Difficulty, Genre, PalettePreset, ParticleType, WeatherType, DEFAULT_PALETTE,
    NAMED_COLORS, PALETTE_PRESETS, ROLE_NOUNS,
};
