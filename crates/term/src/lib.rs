//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget/layout frameworks and renders into a plain framebuffer that is
//! flushed to the terminal as a diff.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep drawing pure so frames can be asserted in tests
//! - Expose the layout so pointer clicks can be hit-tested

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_scores as scores;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_style, AnchorY, GameView, HudView, Rect, ViewLayout, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
