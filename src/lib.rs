//! Patch Rack Library
//!
//! Core of a modular-synth patch editor: modules on a scrollable rack,
//! cables dragged between their ports, and a signal graph kept in step
//! with the visible patch.

pub mod app;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod rack;

#[cfg(test)]
mod test_utils;

pub use config::EditorConfig;
pub use editor::PatchEditor;
pub use error::PatchError;
