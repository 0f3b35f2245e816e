//! Terminal 2048 runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. The loop polls
//! with a short timeout so the elapsed clock keeps moving between key presses.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::info;

use tui_2048::config::{init_tracing, Config};
use tui_2048::core::GameState;
use tui_2048::input::{handle_key_event, handle_mouse_event, handle_prompt_key, should_quit};
use tui_2048::scores::ScoreStore;
use tui_2048::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_2048::types::{STATIC_REDRAW_MS, TICK_MS};
use tui_2048::Shell;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.log_file.as_deref())?;

    let seed = config.seed();
    let store = ScoreStore::open(config.scores_path());
    info!(seed, path = %store.path().display(), "starting");
    let mut shell = Shell::new(GameState::new(seed), store, config.name.clone(), config.ask_name);
    if config.reset_scores {
        shell.reset_scores();
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut shell);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, shell: &mut Shell) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS as u64);
    let epoch = Instant::now();
    let tick = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let now = Local::now();

        let now_ms = epoch.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, shell.frame_fingerprint(now)) {
            let snap = shell.game().snapshot();
            view.render_into(&snap, &shell.hud(now), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        if !event::poll(tick)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c =
                    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
                if shell.prompt().is_some() {
                    // Typing a name: only Ctrl+C leaves, 'q' is a letter.
                    if ctrl_c {
                        return Ok(());
                    }
                    if let Some(edit) = handle_prompt_key(key) {
                        shell.handle_prompt_key(edit);
                    }
                    continue;
                }
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    shell.handle_action(action);
                }
            }
            Event::Mouse(mouse) => {
                if let Some((col, row)) = handle_mouse_event(mouse) {
                    shell.handle_click(col, row, &view.layout(viewport));
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                throttle.force();
            }
            _ => {}
        }
    }
}
