//! Keyboard state for the frame loop.
//!
//! `KeyTracker` remembers, per key, the frame of its most recent press or
//! repeat.  A key is held while that frame is recent enough, so movement and
//! fire keys combine freely within a frame.
//!
//! Terminals with keyboard enhancement send real releases and the key drops
//! out at once.  Classic terminals send only presses, with OS auto-repeat
//! arriving as further presses: a fresh press stays held for
//! `FIRST_REPEAT_WINDOW` to bridge the auto-repeat delay, after which each
//! repeat only extends the hold by `HOLD_WINDOW`.  On such terminals a quick
//! tap therefore keeps a key held for up to `FIRST_REPEAT_WINDOW` frames.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Hold extension granted by an auto-repeat (≈133 ms @ 60 FPS).
pub const HOLD_WINDOW: u64 = 8;
/// Hold granted by a fresh press; covers a 500 ms auto-repeat delay (600 ms @ 60 FPS).
pub const FIRST_REPEAT_WINDOW: u64 = 36;

/// Everything the simulation needs to know about the keyboard for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// One-shot: restart was pressed this frame.
    pub restart: bool,
    /// One-shot: quit (Esc, Q or Ctrl-C) was pressed this frame.
    pub quit: bool,
}

impl FrameInput {
    /// Net horizontal direction; opposing keys cancel out.
    pub fn direction(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

#[derive(Clone, Copy, Debug)]
struct Held {
    last_seen: u64,
    /// Auto-repeat has started for this key.
    repeating: bool,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashMap<KeyCode, Held>,
    frame: u64,
    restart: bool,
    quit: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame; one-shot actions from the previous frame are cleared.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.restart = false;
        self.quit = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let KeyEvent { code, kind, modifiers, .. } = key;
        match kind {
            KeyEventKind::Press => {
                self.touch(normalize(code));
                match code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => self.restart = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.touch(normalize(code));
            }
            KeyEventKind::Release => {
                self.held.remove(&normalize(code));
            }
        }
    }

    /// Record a press or repeat.  Seeing a key that is still held means the
    /// OS auto-repeat is running.
    fn touch(&mut self, code: KeyCode) {
        let repeating = self.is_held(code);
        self.held.insert(
            code,
            Held {
                last_seen: self.frame,
                repeating,
            },
        );
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held
            .get(&normalize(key))
            .map(|h| {
                let window = if h.repeating { HOLD_WINDOW } else { FIRST_REPEAT_WINDOW };
                self.frame.saturating_sub(h.last_seen) <= window
            })
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            left: self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            right: self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            fire: self.is_held(KeyCode::Char(' ')),
            restart: self.restart,
            quit: self.quit,
        }
    }
}

/// Letter keys are tracked case-insensitively so Shift doesn't drop a held key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
