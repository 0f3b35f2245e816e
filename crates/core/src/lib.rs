//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and state management of 2048.
//! It has **no dependencies** on UI or I/O, which makes it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests cover every rule
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: The board is a `Copy` array; moves never allocate
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid, rotation table and the push-left merge
//! - [`game_state`]: Score, status, timestamps, spawns and terminal detection
//! - [`rng`]: Seedable LCG used for spawn position and value
//! - [`snapshot`]: Copyable view of a game for renderers
//!
//! # Game Rules
//!
//! - **Moves**: Every direction is "rotate clockwise, push left, rotate back"
//! - **Merges**: Equal neighbours (after sliding) merge once per move; the
//!   merged value is added to the score
//! - **No-op moves**: A move that changes nothing does nothing (no spawn)
//! - **Spawns**: One tile after each move; 4 with probability 1/10, else 2
//! - **Game over**: When no direction can change the board
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::{Direction, Status};
//!
//! // Create a game: two tiles are already on the board
//! let mut game = GameState::new(12345);
//! assert_eq!(game.board().tile_count(), 2);
//!
//! // Moves that change the board spawn a tile
//! for d in Direction::ALL {
//!     if let Some(event) = game.apply_move(d) {
//!         assert!(event.spawned.is_some());
//!     }
//! }
//!
//! assert_eq!(game.status(), Status::InPlay);
//! ```

pub mod board;
pub mod game_state;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{push_row_left, Board, ROTATE_CW};
pub use game_state::{GameState, MoveEvent, Spawn};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
