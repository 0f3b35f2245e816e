//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::scores::HighScoreEntry;
use crate::types::{GameAction, BOARD_SIDE};

const NEW_GAME_LABEL: &str = "[ New Game ]";
const PANEL_MIN_W: u16 = 16;
const HIGH_SCORE_ROWS: usize = 5;

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_TILE: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && (col - self.x) < self.w
            && (row - self.y) < self.h
    }
}

/// Where things land for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    /// Board including its border.
    pub frame: Rect,
    /// Side panel, when the viewport is wide enough.
    pub panel: Option<Rect>,
    /// Clickable restart button inside the panel.
    pub new_game: Option<Rect>,
}

impl ViewLayout {
    /// Action for a pointer click at (col, row).
    pub fn hit(&self, col: u16, row: u16) -> Option<GameAction> {
        match self.new_game {
            Some(button) if button.contains(col, row) => Some(GameAction::Restart),
            _ => None,
        }
    }
}

/// Everything drawn besides the board itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudView<'a> {
    pub elapsed_secs: u64,
    /// Ranked list, best first.
    pub high_scores: &'a [HighScoreEntry],
    /// Name being typed for a new high score, when the prompt is open.
    pub name_prompt: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    /// Gap between tiles (and between tiles and the border).
    gap_x: u16,
    gap_y: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 tiles look roughly square with typical terminal glyphs.
        Self {
            tile_w: 7,
            tile_h: 3,
            gap_x: 1,
            gap_y: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame_size(&self) -> (u16, u16) {
        let side = BOARD_SIDE as u16;
        let inner_w = side * self.tile_w + (side + 1) * self.gap_x;
        let inner_h = side * self.tile_h + (side + 1) * self.gap_y;
        (inner_w + 2, inner_h + 2)
    }

    /// Geometry of board, panel and button for `viewport`.
    pub fn layout(&self, viewport: Viewport) -> ViewLayout {
        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_MIN_W + 2) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = Rect {
            x: start_x,
            y: start_y,
            w: frame_w,
            h: frame_h,
        };

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        let panel_w = viewport.width.saturating_sub(panel_x);
        if panel_w < PANEL_MIN_W {
            return ViewLayout {
                frame,
                panel: None,
                new_game: None,
            };
        }

        let panel = Rect {
            x: panel_x,
            y: start_y,
            w: panel_w,
            h: viewport.height.saturating_sub(start_y),
        };
        let button_y = start_y.saturating_add(12);
        let new_game = (button_y < viewport.height).then_some(Rect {
            x: panel_x,
            y: button_y,
            w: NEW_GAME_LABEL.len() as u16,
            h: 1,
        });

        ViewLayout {
            frame,
            panel: Some(panel),
            new_game,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let layout = self.layout(viewport);
        let frame = layout.frame;

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let bg = CellStyle::new(BOARD_BG, BOARD_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', bg);
        self.draw_border(fb, frame, border);

        for y in 0..BOARD_SIDE {
            for x in 0..BOARD_SIDE {
                self.draw_tile(fb, frame, x as u16, y as u16, snap.board[y][x]);
            }
        }

        if let Some(panel) = layout.panel {
            self.draw_side_panel(fb, snap, hud, panel, layout.new_game);
        }

        if snap.game_over() {
            self.draw_overlay_text(fb, frame, 0, " GAME OVER ");
            if let Some(name) = hud.name_prompt {
                self.draw_name_prompt(fb, frame, name);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, r: Rect, style: CellStyle) {
        if r.w < 2 || r.h < 2 {
            return;
        }

        fb.put_char(r.x, r.y, '┌', style);
        fb.put_char(r.x + r.w - 1, r.y, '┐', style);
        fb.put_char(r.x, r.y + r.h - 1, '└', style);
        fb.put_char(r.x + r.w - 1, r.y + r.h - 1, '┘', style);

        for dx in 1..r.w - 1 {
            fb.put_char(r.x + dx, r.y, '─', style);
            fb.put_char(r.x + dx, r.y + r.h - 1, '─', style);
        }
        for dy in 1..r.h - 1 {
            fb.put_char(r.x, r.y + dy, '│', style);
            fb.put_char(r.x + r.w - 1, r.y + dy, '│', style);
        }
    }

    /// Top-left terminal cell of tile (x, y).
    pub fn tile_origin(&self, frame: Rect, x: u16, y: u16) -> (u16, u16) {
        let px = frame.x + 1 + self.gap_x + x * (self.tile_w + self.gap_x);
        let py = frame.y + 1 + self.gap_y + y * (self.tile_h + self.gap_y);
        (px, py)
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, frame: Rect, x: u16, y: u16, value: u32) {
        let (px, py) = self.tile_origin(frame, x, y);
        let style = tile_style(value);
        fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', style);

        if value != 0 {
            let mut digits = [0u8; 10];
            let len = crate::fb::format_u32(value, &mut digits);
            // Digits are ASCII.
            let text = std::str::from_utf8(&digits[..len]).unwrap_or("?");
            fb.put_str_centered(px, py + self.tile_h / 2, self.tile_w, text, style.bold());
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        panel: Rect,
        new_game: Option<Rect>,
    ) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let x = panel.x;
        let mut y = panel.y;

        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, snap.score, value);
        y = y.saturating_add(3);

        let best = hud
            .high_scores
            .first()
            .map(|e| e.score)
            .unwrap_or(0)
            .max(snap.score);
        fb.put_str(x, y, "BEST", label);
        fb.put_u32(x, y + 1, best, value);
        y = y.saturating_add(3);

        fb.put_str(x, y, "TIME", label);
        put_clock(fb, x, y + 1, hud.elapsed_secs, value);
        y = y.saturating_add(3);

        fb.put_str(x, y, "MOVES", label);
        fb.put_u32(x, y + 1, snap.moves, value);

        if let Some(button) = new_game {
            let style = CellStyle::new(Rgb::new(249, 246, 242), Rgb::new(143, 122, 102)).bold();
            fb.put_str(button.x, button.y, NEW_GAME_LABEL, style);
            y = button.y.saturating_add(2);
        } else {
            y = y.saturating_add(3);
        }

        if y >= fb.height() {
            return;
        }
        fb.put_str(x, y, "HIGH SCORES", label);
        y = y.saturating_add(1);
        if hud.high_scores.is_empty() {
            fb.put_str(x, y, "-", dim);
            return;
        }
        let name_w = panel.w.saturating_sub(9) as usize;
        for (i, entry) in hud.high_scores.iter().take(HIGH_SCORE_ROWS).enumerate() {
            if y >= fb.height() {
                break;
            }
            let cx = fb.put_u32(x, y, i as u32 + 1, dim);
            let cx = fb.put_str(cx, y, ". ", dim);
            let cx = fb.put_u32(cx, y, entry.score, value);
            let cx = fb.put_str(cx, y, " ", value);
            let name: String = entry.name.chars().take(name_w).collect();
            fb.put_str(cx, y, &name, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Rect, dy: u16, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add(dy);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str_centered(frame.x, mid_y, frame.w, text, style);
    }

    fn draw_name_prompt(&self, fb: &mut FrameBuffer, frame: Rect, name: &str) {
        let max = frame.w.saturating_sub(12) as usize;
        // Keep the tail visible while typing long names.
        let skip = name.chars().count().saturating_sub(max);
        let shown: String = name.chars().skip(skip).collect();
        let mut line = String::with_capacity(shown.len() + 10);
        line.push_str(" NAME: ");
        line.push_str(&shown);
        line.push_str("_ ");
        self.draw_overlay_text(fb, frame, 2, &line);
        self.draw_overlay_text(fb, frame, 3, " Enter to save ");
    }
}

/// `m:ss`, or `h:mm:ss` past the hour.
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, secs: u64, style: CellStyle) {
    let h = (secs / 3600).min(u32::MAX as u64) as u32;
    let m = ((secs / 60) % 60) as u32;
    let s = (secs % 60) as u32;

    let mut cx = x;
    if h > 0 {
        cx = fb.put_u32(cx, y, h, style);
        cx = fb.put_str(cx, y, ":", style);
        if m < 10 {
            cx = fb.put_str(cx, y, "0", style);
        }
    }
    cx = fb.put_u32(cx, y, m, style);
    cx = fb.put_str(cx, y, ":", style);
    if s < 10 {
        cx = fb.put_str(cx, y, "0", style);
    }
    fb.put_u32(cx, y, s, style);
}

/// Colours of a tile holding `value` (0 = empty).
pub fn tile_style(value: u32) -> CellStyle {
    let (bg, fg) = match value {
        0 => (EMPTY_TILE, EMPTY_TILE),
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    };
    CellStyle::new(fg, bg)
}
