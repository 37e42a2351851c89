//! Application module
//!
//! Contains the egui front-end and its theme definitions.

pub mod editor_app;
pub mod theme;

pub use editor_app::EditorApp;
