//! Terminal 2048 (workspace facade crate).
//!
//! The engine, input mapping, score store and renderer live in dedicated
//! crates under `crates/`; this package re-exports them as
//! `tui_2048::{core,input,scores,term,types}` and adds the command line
//! [`config`] and the presentation [`shell`] that ties them together.

pub mod config;
pub mod shell;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_scores as scores;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub use config::Config;
pub use shell::Shell;
