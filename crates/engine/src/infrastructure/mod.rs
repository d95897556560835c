//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod extraction;
pub mod generator;
pub mod ollama;
pub mod ports;
pub mod session_store;
pub mod templates;
