//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one; only changed runs of cells
//! are re-emitted. A size change (or [`TerminalRenderer::invalidate`]) forces
//! a full redraw.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            active: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor, mouse capture.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle("2048"))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    /// Undo everything [`TerminalRenderer::enter`] did. Safe to call twice.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then keep it as the reference for the next diff.
    ///
    /// The previous frame's allocation is handed back through `fb`, so a
    /// caller that redraws into the same buffer every tick never allocates.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut spare = match self.last.take() {
            Some(prev) => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        spare.resize(fb.width(), fb.height());
        std::mem::swap(&mut spare, fb);
        self.last = Some(spare);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // Best effort: never leave the shell in raw mode.
        let _ = self.exit();
    }
}

/// Clear the screen and print every row of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::new(out);
    for y in 0..fb.height() {
        if let Some(row) = fb.row(y) {
            pen.print_at(0, y, row)?;
        }
    }
    pen.finish()
}

/// Print only the cells of `next` that differ from `prev` into `out`.
///
/// Frames of different sizes fall back to [`encode_full_into`]. Identical
/// frames produce only the trailing style reset.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }
    let mut pen = Pen::new(out);
    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        for run in ChangedRuns::new(old, new) {
            pen.print_at(run.start as u16, y, &new[run])?;
        }
    }
    pen.finish()
}

/// Writes cell runs, switching style only when it changes.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn print_at(&mut self, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for cell in cells {
            if self.style != Some(cell.style) {
                apply_style_into(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Maximal ranges of columns where two equally long rows disagree.
struct ChangedRuns<'a> {
    old: &'a [Cell],
    new: &'a [Cell],
    pos: usize,
}

impl<'a> ChangedRuns<'a> {
    fn new(old: &'a [Cell], new: &'a [Cell]) -> Self {
        Self { old, new, pos: 0 }
    }

    fn differs(&self, i: usize) -> bool {
        self.old.get(i) != self.new.get(i)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let len = self.new.len();
        let start = (self.pos..len).find(|&i| self.differs(i))?;
        let end = (start..len).find(|&i| !self.differs(i)).unwrap_or(len);
        self.pos = end;
        Some(start..end)
    }
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
