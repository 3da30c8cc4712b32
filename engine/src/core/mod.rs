//! Video Studio Core Engine
//!
//! Core editing engine module.
//! Handles the timeline model, edit commands, editor state and settings.

pub mod commands;
pub mod editor;
pub mod settings;
pub mod timeline;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;

#[cfg(test)]
mod tests_destructive;
