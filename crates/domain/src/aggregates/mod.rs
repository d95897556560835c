//! Aggregate roots - domain objects that own their related data
//!
//! - [`GameSpecification`] is the value being filled in, one turn at a time
//! - [`Session`] owns a specification together with its conversation state,
//!   history and undo snapshots

pub mod game_spec;
pub mod session;

pub use game_spec::{FeatureFlag, GameSpecification, SpecUpdate};
pub use session::{
    HistoryTurn, Session, Snapshot, TurnOutcome, TurnRole, MAX_UNDO_DEPTH,
};
