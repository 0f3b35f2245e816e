//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board engine, terminal rendering, high-score shell).
//!
//! # Board Dimensions
//!
//! The playfield is a 4x4 grid stored row-major:
//!
//! - **Side**: 4 cells (indexed 0-3 on both axes)
//! - **Cells**: 16, cell `(x, y)` lives at index `x + 4 * y`
//!
//! # Spawning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_FOUR_CHANCE` | 1 | Out of `SPAWN_ODDS_DENOMINATOR`, chance of a 4 |
//! | `SPAWN_ODDS_DENOMINATOR` | 10 | 2 spawns with probability 9/10 |
//! | `INITIAL_TILES` | 2 | Tiles seeded by a reset |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{is_tile_value, Direction, BOARD_SIDE, CELL_COUNT};
//!
//! // Every direction reduces to "push left" after some clockwise turns
//! assert_eq!(Direction::Left.rotations(), 0);
//! assert_eq!(Direction::Up.rotations(), 3);
//!
//! // Tiles are powers of two, starting at 2
//! assert!(is_tile_value(2048));
//! assert!(!is_tile_value(3));
//!
//! assert_eq!(BOARD_SIDE, 4);
//! assert_eq!(CELL_COUNT, 16);
//! ```

/// Board side length in cells
pub const BOARD_SIDE: usize = 4;

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// Number of tiles placed by a reset
pub const INITIAL_TILES: usize = 2;

/// Value of the common spawn
pub const SPAWN_LOW: u32 = 2;

/// Value of the rare spawn
pub const SPAWN_HIGH: u32 = 4;

/// Chance (out of `SPAWN_ODDS_DENOMINATOR`) that a spawn is `SPAWN_HIGH`
pub const SPAWN_FOUR_CHANCE: u32 = 1;

/// Denominator for spawn odds
pub const SPAWN_ODDS_DENOMINATOR: u32 = 10;

/// Input poll interval of the terminal runner in milliseconds
pub const TICK_MS: u32 = 50;

/// Upper bound between two redraws of an unchanged frame (keeps the timer live)
pub const STATIC_REDRAW_MS: u32 = 500;

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(v)`: Tile holding `v`, always a power of two `>= 2`
pub type Cell = Option<u32>;

/// True for values a tile may hold: `2^k` with `k >= 1`
///
/// `2^31` is a legal tile but can never merge; doubling it would overflow.
pub const fn is_tile_value(v: u32) -> bool {
    v >= 2 && v.is_power_of_two()
}

/// Directions a move can push the tiles toward
///
/// The discriminant is the number of 90° clockwise turns that turn a push in
/// this direction into a push toward the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl Direction {
    /// All directions in rotation order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    /// Clockwise quarter turns that map this push onto a left push
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::Left.rotations(), 0);
    /// assert_eq!(Direction::Down.rotations(), 1);
    /// assert_eq!(Direction::Right.rotations(), 2);
    /// assert_eq!(Direction::Up.rotations(), 3);
    /// ```
    pub fn rotations(&self) -> u8 {
        *self as u8
    }

    /// Quarter turns that undo [`Direction::rotations`]
    pub fn inverse_rotations(&self) -> u8 {
        (4 - self.rotations()) % 4
    }
}

/// Lifecycle of one game
///
/// `InPlay` becomes `GameEnd` once no push can change the board; only a reset
/// goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    InPlay,
    GameEnd,
}

/// Game actions that can be applied to modify game state
///
/// Produced by keyboard and pointer input, consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Push every tile toward an edge
    Move(Direction),
    /// Start a new game (at any time)
    Restart,
}
