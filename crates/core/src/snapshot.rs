use chrono::{DateTime, Local};

use crate::types::{Status, BOARD_SIDE};

/// Plain copy of everything the view layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Tile values by row, `0` for empty
    pub board: [[u32; BOARD_SIDE]; BOARD_SIDE],
    pub status: Status,
    pub episode_id: u32,
    pub seed: u32,
    pub score: u32,
    pub moves: u32,
    pub max_tile: u32,
    pub started_at: DateTime<Local>,
    pub ended_at: Option<DateTime<Local>>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u32; BOARD_SIDE]; BOARD_SIDE];
        self.status = Status::InPlay;
        self.episode_id = 0;
        self.seed = 0;
        self.score = 0;
        self.moves = 0;
        self.max_tile = 0;
        self.started_at = DateTime::<Local>::from(std::time::UNIX_EPOCH);
        self.ended_at = None;
    }

    pub fn game_over(&self) -> bool {
        self.status == Status::GameEnd
    }

    /// FNV-1a over the fields that change what a frame shows.
    ///
    /// Timestamps are left out; the runner folds the elapsed seconds in
    /// separately.
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        let mut feed = |v: u32| {
            for b in v.to_le_bytes() {
                h ^= b as u64;
                h = h.wrapping_mul(0x00000100000001B3);
            }
        };
        for row in &self.board {
            for &v in row {
                feed(v);
            }
        }
        feed(self.score);
        feed(self.moves);
        feed(self.episode_id);
        feed(self.status as u32);
        h
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u32; BOARD_SIDE]; BOARD_SIDE],
            status: Status::InPlay,
            episode_id: 0,
            seed: 0,
            score: 0,
            moves: 0,
            max_tile: 0,
            started_at: DateTime::<Local>::from(std::time::UNIX_EPOCH),
            ended_at: None,
        };
        s.clear();
        s
    }
}
