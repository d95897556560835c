//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area.
//! Use cases orchestrate ports and the domain session to fulfill user stories.

pub mod conversation;
pub mod games;
pub mod session;

pub use conversation::ConversationUseCases;
pub use games::GameUseCases;
pub use session::SessionUseCases;
