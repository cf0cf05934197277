use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use space_invaders::compute::{init_state, step, FPS};
use space_invaders::display::{render, Surface};
use space_invaders::error::GameError;
use space_invaders::input::KeyTracker;
use space_invaders::pacing::FrameLimiter;

const LOG_FILE: &str = "space_invaders.log";
const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

// ── Logging ───────────────────────────────────────────────────────────────────

/// stdout is the game screen, so logs go to a file in the temp directory.
/// Level defaults to `info`; override with `RUST_LOG`.
fn init_logging() -> Result<PathBuf, GameError> {
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))?;
    Ok(path)
}

fn check_terminal_size() -> Result<(u16, u16), GameError> {
    let (cols, rows) = terminal::size()?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok((cols, rows))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One iteration per frame: drain input, advance the simulation, draw, pace.
/// Returns when the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    size: (u16, u16),
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut state = init_state();
    let mut keys = KeyTracker::new();
    let mut surface = Surface::new(size.0, size.1);
    let mut limiter = FrameLimiter::new(FPS);

    info!(aliens = state.aliens.len(), lives = state.lives, "game started");

    loop {
        keys.begin_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => keys.handle_key(key),
                Event::Resize(cols, rows) => {
                    out.execute(terminal::Clear(terminal::ClearType::All))?;
                    surface = Surface::new(cols, rows);
                }
                _ => {}
            }
        }

        let input = keys.snapshot();
        if input.quit {
            info!(score = state.score, frame = state.frame, "quit requested");
            return Ok(());
        }

        state = step(&state, &input, &mut rng);

        render(&mut surface, &state);
        surface.present(out)?;

        limiter.wait();
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Puts the terminal back the way the shell expects it when dropped.  Built
/// right after raw mode is on, so any later setup failure still restores it.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Forward terminal events to the game loop.  `event::read` blocks, so it
/// runs on its own thread; the thread ends once the receiver is gone or the
/// terminal stops delivering events.
fn spawn_event_reader(tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                return;
            }
        }
    });
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let log_path = init_logging().context("could not set up logging")?;
    let size = check_terminal_size()?;
    info!(log = %log_path.display(), cols = size.0, rows = size.1, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("could not enable raw mode")?;
    let mut guard = TerminalGuard { keyboard_enhanced: false };
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events need the kitty keyboard protocol; without it input
    // falls back to the press/repeat hold windows.
    guard.keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !guard.keyboard_enhanced {
        warn!("keyboard enhancement unavailable, using key-repeat hold window");
    }

    let (tx, rx) = mpsc::channel::<Event>();
    spawn_event_reader(tx);

    let result = game_loop(&mut out, &rx, size);
    drop(guard);

    result.context("game loop failed")
}
