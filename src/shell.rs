//! Presentation state: the running game, the score store and the optional
//! name prompt shown when a game ends.
//!
//! The shell is pure state; `main` feeds it decoded input and draws whatever
//! [`Shell::hud`] and [`GameState::snapshot`] describe.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::core::{GameState, MoveEvent};
use crate::input::PromptKey;
use crate::scores::{HighScoreEntry, ScoreStore};
use crate::term::{HudView, ViewLayout};
use crate::types::GameAction;

/// Longest name the prompt accepts.
pub const MAX_NAME_LEN: usize = 16;

pub struct Shell {
    game: GameState,
    store: ScoreStore,
    player_name: String,
    ask_name: bool,
    prompt: Option<String>,
    /// Episode whose final score is already in the store.
    recorded_episode: Option<u32>,
    last_rank: Option<usize>,
}

impl Shell {
    pub fn new(game: GameState, store: ScoreStore, player_name: impl Into<String>, ask_name: bool) -> Self {
        let mut shell = Self {
            game,
            store,
            player_name: player_name.into(),
            ask_name,
            prompt: None,
            recorded_episode: None,
            last_rank: None,
        };
        // A game can start out stuck when built from a fixed board.
        shell.check_game_end();
        shell
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Name typed so far, while the prompt is open.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Rank (0-based) of the most recently recorded game.
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Apply a move or restart.
    ///
    /// Moves are ignored while the name prompt is open. A restart with the
    /// prompt open records the finished game under the default name first.
    pub fn handle_action(&mut self, action: GameAction) -> Option<MoveEvent> {
        match action {
            GameAction::Restart => {
                if self.prompt.take().is_some() {
                    self.record_result(self.player_name.clone());
                }
                self.game.reset();
                info!(episode = self.game.episode_id(), "new game");
                None
            }
            GameAction::Move(_) if self.prompt.is_some() => None,
            GameAction::Move(_) => {
                let event = self.game.apply_action(action);
                self.check_game_end();
                event
            }
        }
    }

    /// Edit, submit or cancel the name prompt. No-op when it is closed.
    pub fn handle_prompt_key(&mut self, key: PromptKey) {
        let Some(buf) = self.prompt.as_mut() else {
            return;
        };
        match key {
            PromptKey::Char(c) => {
                if buf.chars().count() < MAX_NAME_LEN {
                    buf.push(c);
                }
            }
            PromptKey::Backspace => {
                buf.pop();
            }
            PromptKey::Submit => {
                let typed = buf.trim().to_string();
                self.prompt = None;
                let name = if typed.is_empty() {
                    self.player_name.clone()
                } else {
                    typed
                };
                self.record_result(name);
            }
            PromptKey::Cancel => {
                self.prompt = None;
                self.record_result(self.player_name.clone());
            }
        }
    }

    /// Pointer click at terminal cell (col, row). Returns whether it hit anything.
    pub fn handle_click(&mut self, col: u16, row: u16, layout: &ViewLayout) -> bool {
        match layout.hit(col, row) {
            Some(action) => {
                self.handle_action(action);
                true
            }
            None => false,
        }
    }

    /// Empty the score store; a failed write is logged and the in-memory
    /// list is still cleared.
    pub fn reset_scores(&mut self) {
        match self.store.reset() {
            Ok(()) => info!(path = %self.store.path().display(), "high scores cleared"),
            Err(e) => warn!(path = %self.store.path().display(), error = %e, "failed to clear high scores"),
        }
    }

    pub fn hud(&self, now: DateTime<Local>) -> HudView<'_> {
        HudView {
            elapsed_secs: self.elapsed_secs(now),
            high_scores: self.store.scores().entries(),
            name_prompt: self.prompt.as_deref(),
        }
    }

    /// Hash of everything a frame shows, for render throttling.
    pub fn frame_fingerprint(&self, now: DateTime<Local>) -> u64 {
        let mut h = DefaultHasher::new();
        self.game.snapshot().fingerprint().hash(&mut h);
        self.elapsed_secs(now).hash(&mut h);
        self.prompt.hash(&mut h);
        self.store.scores().len().hash(&mut h);
        h.finish()
    }

    fn elapsed_secs(&self, now: DateTime<Local>) -> u64 {
        self.game.elapsed(now).num_seconds().max(0) as u64
    }

    fn check_game_end(&mut self) {
        if !self.game.is_game_over()
            || self.prompt.is_some()
            || self.recorded_episode == Some(self.game.episode_id())
        {
            return;
        }
        info!(
            episode = self.game.episode_id(),
            score = self.game.score(),
            moves = self.game.moves(),
            "game over"
        );
        if self.ask_name {
            self.prompt = Some(String::new());
        } else {
            self.record_result(self.player_name.clone());
        }
    }

    fn record_result(&mut self, name: String) {
        if self.recorded_episode == Some(self.game.episode_id()) {
            return;
        }
        self.recorded_episode = Some(self.game.episode_id());

        let datetime = self.game.end_time().unwrap_or_else(Local::now);
        let score = self.game.score();
        let rank = self.store.scores().rank_of(score);
        match self.store.record(HighScoreEntry::new(name, datetime, score)) {
            Ok(rank) => info!(rank, score, "high score saved"),
            Err(e) => warn!(
                path = %self.store.path().display(),
                error = %e,
                "failed to save high scores"
            ),
        }
        self.last_rank = Some(rank);
    }
}
