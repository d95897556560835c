//! Gamecraft Protocol - wire types for the chat HTTP API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde and the domain vocabulary types
//! 2. **No business logic** - pure data types and serialization
//! 3. **Raw ids** - session ids travel as plain strings

pub mod requests;
pub mod responses;

pub use requests::{ChatRequest, UndoRequest};
pub use responses::{
    ChatResponse, ErrorResponse, GamesResponse, SessionView, UndoResponse,
};
