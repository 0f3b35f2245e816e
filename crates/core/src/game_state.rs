//! Game state module - manages the complete game state
//!
//! This module ties together the board, the spawn RNG and the score.
//! It owns the game lifecycle: reset, moves, spawns and the transition to
//! the terminal state once no push can change the board.

use chrono::{DateTime, Local, TimeDelta};
use tracing::debug;

use crate::{snapshot::GameSnapshot, Board, SimpleRng};
use crate::types::*;

/// A tile placed after a move or a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spawn {
    /// Flat board index (`x + 4 * y`)
    pub index: usize,
    pub value: u32,
}

/// Outcome of a move that changed the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveEvent {
    pub direction: Direction,
    /// Sum of the merged (doubled) values
    pub score_gained: u32,
    pub spawned: Option<Spawn>,
    /// The move left no legal follow-up and ended the game
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    rng: SimpleRng,
    /// Seed the RNG was created with.
    seed: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    score: u32,
    /// Moves that changed the board in this episode.
    moves: u32,
    status: Status,
    start_time: DateTime<Local>,
    end_time: Option<DateTime<Local>>,
    /// Last move that changed the board.
    last_event: Option<MoveEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and seed the first two tiles
    pub fn new(seed: u32) -> Self {
        let mut state = Self::blank(seed);
        state.reset();
        state
    }

    /// Create a game from an arranged board
    ///
    /// No tiles are spawned. The status is derived from the board, so a
    /// stuck board starts out as [`Status::GameEnd`]. Returns `None` if any
    /// cell holds a value that is not a tile (see [`Board::is_valid`]).
    pub fn with_board(board: Board, seed: u32) -> Option<Self> {
        if !board.is_valid() {
            return None;
        }
        let mut state = Self::blank(seed);
        state.episode_id = 1;
        state.board = board;
        if !state.board.has_moves() {
            state.finish();
        }
        Some(state)
    }

    fn blank(seed: u32) -> Self {
        Self {
            board: Board::new(),
            rng: SimpleRng::new(seed),
            seed,
            episode_id: 0,
            score: 0,
            moves: 0,
            status: Status::InPlay,
            start_time: Local::now(),
            end_time: None,
            last_event: None,
        }
    }

    /// Start a new episode: empty board, zero score, two fresh tiles
    ///
    /// Allowed in any status; the RNG keeps running so consecutive episodes
    /// differ.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.moves = 0;
        self.status = Status::InPlay;
        self.start_time = Local::now();
        self.end_time = None;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);

        for _ in 0..INITIAL_TILES {
            self.spawn_tile();
        }

        debug!(episode = self.episode_id, "game reset");
    }

    /// Apply a game action
    ///
    /// Returns the move event for a move that changed the board.
    pub fn apply_action(&mut self, action: GameAction) -> Option<MoveEvent> {
        match action {
            GameAction::Move(direction) => self.apply_move(direction),
            GameAction::Restart => {
                self.reset();
                None
            }
        }
    }

    /// Push all tiles toward `direction`
    ///
    /// A push that leaves the board unchanged is a no-op: no spawn, no
    /// score, no status change, `None` returned. Otherwise the merge score is
    /// added, one tile spawns and the terminal state is evaluated.
    pub fn apply_move(&mut self, direction: Direction) -> Option<MoveEvent> {
        let (next, gained) = self.board.shifted(direction);
        if next == self.board {
            return None;
        }

        self.board = next;
        self.score = self.score.saturating_add(gained);
        self.moves = self.moves.wrapping_add(1);

        let spawned = self.spawn_tile();

        let game_over = !self.board.has_moves();
        if game_over {
            self.finish();
        }

        let event = MoveEvent {
            direction,
            score_gained: gained,
            spawned,
            game_over,
        };
        self.last_event = Some(event);
        Some(event)
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell
    ///
    /// Returns `None` only when the board is full.
    pub fn spawn_tile(&mut self) -> Option<Spawn> {
        let empties = self.board.empty_cells();
        if empties.is_empty() {
            return None;
        }
        let value = self.rng.spawn_value();
        let index = self.rng.choose(&empties)?;
        self.board.set_index(index, Some(value));
        Some(Spawn { index, value })
    }

    fn finish(&mut self) {
        if self.status == Status::GameEnd {
            return;
        }
        self.status = Status::GameEnd;
        self.end_time = Some(Local::now());
        debug!(
            episode = self.episode_id,
            score = self.score,
            moves = self.moves,
            max_tile = self.board.max_tile(),
            "game over"
        );
    }

    /// True iff at least one direction would change the board
    pub fn has_more_moves(&self) -> bool {
        self.board.has_moves()
    }

    /// Cell at (x, y): `None` outside the board, `Some(None)` when empty
    pub fn tile(&self, x: i8, y: i8) -> Option<Cell> {
        self.board.get(x, y)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == Status::GameEnd
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    /// Play time up to `now`, frozen at the end time once the game is over
    pub fn elapsed(&self, now: DateTime<Local>) -> TimeDelta {
        let until = self.end_time.unwrap_or(now);
        (until - self.start_time).max(TimeDelta::zero())
    }

    pub fn last_event(&self) -> Option<MoveEvent> {
        self.last_event
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u32_grid(&mut out.board);
        out.status = self.status;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.score = self.score;
        out.moves = self.moves;
        out.max_tile = self.board.max_tile();
        out.started_at = self.start_time;
        out.ended_at = self.end_time;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
