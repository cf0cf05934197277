//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and log output.

use rand::Rng;
use tracing::{debug, info};

use crate::entities::{Alien, AlienKind, Bullet, BulletOwner, GameState, GameStatus, Player};
use crate::input::FrameInput;

// ── World constants ──────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
pub const FPS: u32 = 60;

pub const START_LIVES: u32 = 3;
/// Frames between two player shots.
pub const SHOOT_COOLDOWN: u32 = 20;

pub const ALIEN_ROWS: usize = 5;
pub const ALIEN_COLS: usize = 10;
const ALIEN_ORIGIN_X: i32 = 100;
const ALIEN_ORIGIN_Y: i32 = 50;
const ALIEN_SPACING_X: i32 = 60;
const ALIEN_SPACING_Y: i32 = 50;
pub const ALIEN_SPEED: i32 = 1;
/// Vertical step taken by the whole formation on edge contact.
pub const ALIEN_DROP: i32 = 20;
/// Per-frame chance that the formation fires a bullet.
pub const ALIEN_FIRE_CHANCE: f64 = 0.02;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Full 5×10 grid in row-major order, top row first.
pub fn spawn_formation() -> Vec<Alien> {
    (0..ALIEN_ROWS)
        .flat_map(|row| {
            (0..ALIEN_COLS).map(move |col| Alien {
                x: ALIEN_ORIGIN_X + col as i32 * ALIEN_SPACING_X,
                y: ALIEN_ORIGIN_Y + row as i32 * ALIEN_SPACING_Y,
                kind: AlienKind::for_row(row),
            })
        })
        .collect()
}

/// Build the start-of-game state.
pub fn init_state() -> GameState {
    GameState {
        player: Player {
            x: SCREEN_WIDTH / 2 - Player::WIDTH / 2,
            y: SCREEN_HEIGHT - 60,
        },
        aliens: spawn_formation(),
        bullets: Vec::new(),
        score: 0,
        lives: START_LIVES,
        status: GameStatus::Playing,
        shoot_cooldown: 0,
        formation_dir: 1,
        formation_speed: ALIEN_SPEED,
        frame: 0,
    }
}

/// Restart from a terminal state.  Ignored while still playing.
pub fn reset(state: &GameState) -> GameState {
    if !state.status.is_terminal() {
        return state.clone();
    }
    info!(final_score = state.score, status = ?state.status, "restarting game");
    init_state()
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Shift the player horizontally by `direction` steps, clamped to the screen.
pub fn move_player(state: &GameState, direction: i32) -> GameState {
    let new_x = (state.player.x + direction * Player::SPEED)
        .clamp(0, SCREEN_WIDTH - Player::WIDTH);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire from the player's nose if the cooldown has run out.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.shoot_cooldown > 0 {
        return state.clone();
    }
    let new_bullet = Bullet {
        x: state.player.x + Player::WIDTH / 2 - Bullet::WIDTH / 2,
        y: state.player.y,
        owner: BulletOwner::Player,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(new_bullet);
    GameState {
        bullets,
        shoot_cooldown: SHOOT_COOLDOWN,
        ..state.clone()
    }
}

/// Apply one frame of player input.  Only a restart is honoured once the
/// game has reached a terminal state.
pub fn apply_input(state: &GameState, input: &FrameInput) -> GameState {
    if state.status.is_terminal() {
        return if input.restart {
            reset(state)
        } else {
            state.clone()
        };
    }

    let mut next = state.clone();
    let direction = input.direction();
    if direction != 0 {
        next = move_player(&next, direction);
    }
    if input.fire {
        next = player_shoot(&next);
    }
    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }

    let frame = state.frame + 1;
    let shoot_cooldown = state.shoot_cooldown.saturating_sub(1);

    // ── 1. Move bullets, dropping any that leave the screen ──────────────────
    let mut bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let new_y = b.y + Bullet::SPEED * b.owner.direction();
            let gone = match b.owner {
                BulletOwner::Player => new_y < 0,
                BulletOwner::Alien => new_y > SCREEN_HEIGHT,
            };
            if gone {
                None
            } else {
                Some(Bullet { y: new_y, ..b.clone() })
            }
        })
        .collect();

    // ── 2. March the formation, reversing and dropping on edge contact ───────
    let (mut aliens, formation_dir) = march_formation(
        &state.aliens,
        state.formation_dir,
        state.formation_speed,
    );

    // ── 3. Aliens randomly shoot ─────────────────────────────────────────────
    if !aliens.is_empty() && rng.gen_bool(ALIEN_FIRE_CHANCE) {
        let shooter = &aliens[rng.gen_range(0..aliens.len())];
        bullets.push(Bullet {
            x: shooter.x + Alien::WIDTH / 2 - Bullet::WIDTH / 2,
            y: shooter.y + Alien::HEIGHT,
            owner: BulletOwner::Alien,
        });
    }

    // ── 4. Collision: player bullets ↔ aliens ────────────────────────────────
    let mut score_gain: u32 = 0;
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        if bullet.owner != BulletOwner::Player {
            continue;
        }
        let hit = bullet.rect();
        // First alien in formation order wins when several overlap.
        if let Some(ai) = aliens.iter().position(|a| a.rect().intersects(&hit)) {
            let alien = aliens.remove(ai);
            debug!(kind = ?alien.kind, x = alien.x, y = alien.y, "alien destroyed");
            score_gain += alien.kind.points();
            used_bullets.push(bi);
        }
    }

    // ── 5. Collision: alien bullets ↔ player ─────────────────────────────────
    let player_box = state.player.rect();
    let mut hits: u32 = 0;
    for (bi, bullet) in bullets.iter().enumerate() {
        if bullet.owner == BulletOwner::Alien && bullet.rect().intersects(&player_box) {
            hits += 1;
            used_bullets.push(bi);
        }
    }

    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b)
        .collect();

    let lives = state.lives.saturating_sub(hits);
    if hits > 0 {
        info!(lives, "player hit");
    }

    // ── 6. Terminal conditions ───────────────────────────────────────────────
    let invaded = aliens.iter().any(|a| a.rect().bottom() >= state.player.y);
    let status = if lives == 0 || invaded {
        GameStatus::GameOver
    } else if aliens.is_empty() {
        GameStatus::Victory
    } else {
        GameStatus::Playing
    };
    let score = state.score + score_gain;
    if status != GameStatus::Playing {
        info!(score, ?status, invaded, "game finished");
    }

    GameState {
        aliens,
        bullets,
        score,
        lives,
        status,
        shoot_cooldown,
        formation_dir,
        frame,
        ..state.clone()
    }
}

/// One frame of rigid-body formation movement.  Returns the moved aliens and
/// the direction to use on the next frame.
pub fn march_formation(aliens: &[Alien], dir: i32, speed: i32) -> (Vec<Alien>, i32) {
    let mut moved: Vec<Alien> = aliens
        .iter()
        .map(|a| Alien { x: a.x + speed * dir, ..a.clone() })
        .collect();

    let at_edge = moved
        .iter()
        .any(|a| a.x <= 0 || a.rect().right() >= SCREEN_WIDTH);
    if !at_edge {
        return (moved, dir);
    }

    for alien in &mut moved {
        alien.y += ALIEN_DROP;
    }
    (moved, -dir)
}

/// Input then simulation: everything that happens between two renders.
pub fn step(state: &GameState, input: &FrameInput, rng: &mut impl Rng) -> GameState {
    let after_input = apply_input(state, input);
    tick(&after_input, rng)
}
