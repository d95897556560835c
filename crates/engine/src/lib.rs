//! Gamecraft Engine library.
//!
//! Chat server that turns a conversation into a game specification and a
//! generated Godot project.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the domain session
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
