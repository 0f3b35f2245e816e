//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types::GameAction`]s and
//! name-prompt edits. Every 2048 move is a single discrete press, so there is
//! no auto-repeat handling here.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, handle_mouse_event, handle_prompt_key, should_quit, PromptKey};
