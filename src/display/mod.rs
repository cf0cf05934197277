//! Rendering layer.
//!
//! `render` receives a `Canvas` and an immutable view of the game state.
//! No game logic is performed; this module only translates state into
//! draw calls.  Terminal I/O lives in `Surface`.

pub mod canvas;
pub mod surface;

use crossterm::style::Color;

pub use canvas::{Align, Canvas};
pub use surface::Surface;

use crate::compute::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{Alien, Bullet, BulletOwner, GameState, GameStatus, Player};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Color = Color::Rgb { r: 0, g: 0, b: 0 };
pub const C_TEXT: Color = Color::Rgb { r: 255, g: 255, b: 255 };
pub const C_PLAYER: Color = Color::Rgb { r: 0, g: 255, b: 0 };
pub const C_BULLET_PLAYER: Color = Color::Rgb { r: 255, g: 255, b: 0 };
pub const C_BULLET_ALIEN: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const C_EYE: Color = Color::Rgb { r: 255, g: 255, b: 255 };
pub const C_PUPIL: Color = Color::Rgb { r: 0, g: 0, b: 0 };
pub const C_HINT: Color = Color::DarkGrey;

/// Alien body colours indexed by `AlienKind::index`: cyan, purple, red.
pub const C_ALIENS: [Color; 3] = [
    Color::Rgb { r: 0, g: 255, b: 255 },
    Color::Rgb { r: 150, g: 0, b: 255 },
    Color::Rgb { r: 255, g: 0, b: 0 },
];

const ALIEN_CORNER_RADIUS: i32 = 5;
const EYE_RADIUS: i32 = 5;
const PUPIL_RADIUS: i32 = 2;

pub const TITLE: &str = "SPACE INVADERS";
pub const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   ESC : Quit";

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame.
pub fn render(canvas: &mut impl Canvas, state: &GameState) {
    canvas.clear(C_BACKGROUND);

    for alien in &state.aliens {
        draw_alien(canvas, alien);
    }
    for bullet in &state.bullets {
        draw_bullet(canvas, bullet);
    }
    draw_player(canvas, &state.player);

    draw_hud(canvas, state);
    draw_controls_hint(canvas);

    match state.status {
        GameStatus::Playing => {}
        GameStatus::GameOver => draw_overlay(canvas, state, "GAME OVER", C_BULLET_ALIEN),
        GameStatus::Victory => draw_overlay(canvas, state, "VICTORY!", C_PLAYER),
    }
}

pub fn bullet_color(owner: BulletOwner) -> Color {
    match owner {
        BulletOwner::Player => C_BULLET_PLAYER,
        BulletOwner::Alien => C_BULLET_ALIEN,
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player(canvas: &mut impl Canvas, p: &Player) {
    // Ship: nose at top-centre, wings at the bottom corners.
    let points = [
        (p.x + Player::WIDTH / 2, p.y),
        (p.x, p.y + Player::HEIGHT),
        (p.x + Player::WIDTH, p.y + Player::HEIGHT),
    ];
    canvas.fill_polygon(&points, C_PLAYER);
}

fn draw_alien(canvas: &mut impl Canvas, alien: &Alien) {
    let body = C_ALIENS[alien.kind.index()];
    canvas.fill_rect(alien.rect(), body, ALIEN_CORNER_RADIUS);

    let eye_y = alien.y + 8;
    for eye_x in [alien.x + 12, alien.x + 28] {
        canvas.fill_circle((eye_x, eye_y), EYE_RADIUS, C_EYE);
        canvas.fill_circle((eye_x, eye_y), PUPIL_RADIUS, C_PUPIL);
    }
}

fn draw_bullet(canvas: &mut impl Canvas, bullet: &Bullet) {
    canvas.fill_rect(bullet.rect(), bullet_color(bullet.owner), 0);
}

// ── HUD & hint ────────────────────────────────────────────────────────────────

fn draw_hud(canvas: &mut impl Canvas, state: &GameState) {
    canvas.draw_text(10, 10, &format!("Score: {}", state.score), C_TEXT, Align::Left);
    canvas.draw_text(SCREEN_WIDTH / 2, 10, TITLE, C_TEXT, Align::Center);
    canvas.draw_text(
        SCREEN_WIDTH - 10,
        10,
        &format!("Lives: {}", state.lives),
        C_TEXT,
        Align::Right,
    );
}

fn draw_controls_hint(canvas: &mut impl Canvas) {
    canvas.draw_text(SCREEN_WIDTH / 2, SCREEN_HEIGHT - 10, CONTROLS_HINT, C_HINT, Align::Center);
}

// ── Terminal-state overlay ────────────────────────────────────────────────────

fn draw_overlay(canvas: &mut impl Canvas, state: &GameState, title: &str, color: Color) {
    let cx = SCREEN_WIDTH / 2;
    let cy = SCREEN_HEIGHT / 2;
    canvas.draw_text(cx, cy - 50, title, color, Align::Center);
    canvas.draw_text(
        cx,
        cy,
        &format!("Final Score: {}", state.score),
        C_BULLET_PLAYER,
        Align::Center,
    );
    canvas.draw_text(cx, cy + 50, "R - Play Again  Q - Quit", C_TEXT, Align::Center);
}
