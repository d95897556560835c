//! The conversational slot-filling core: classification, extraction, state
//! machine and suggestions. Everything here is a pure function.

mod analysis;
mod extractor;
mod intent;
mod state;
mod suggestions;
pub(crate) mod text;

pub use analysis::{analyze_turn, TurnAnalysis};
pub use extractor::extract_game_params;
pub use intent::{classify_intent, Intent};
pub use state::{transition, ConversationState};
pub use suggestions::{suggest, Suggestion, DEFAULT_MAX_SUGGESTIONS};
pub use text::{title_case, word_count, DESCRIPTION_MIN_WORDS};
