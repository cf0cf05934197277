use crossterm::style::Color;

use space_invaders::compute::init_state;
use space_invaders::display::*;
use space_invaders::entities::*;

// ── Recording canvas ──────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Call {
    Clear(Color),
    Rect(Rect, Color, i32),
    Polygon(Vec<(i32, i32)>, Color),
    Circle((i32, i32), i32, Color),
    Text(i32, i32, String, Color, Align),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Canvas for Recorder {
    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }
    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32) {
        self.calls.push(Call::Rect(rect, color, radius));
    }
    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color) {
        self.calls.push(Call::Polygon(points.to_vec(), color));
    }
    fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: Color) {
        self.calls.push(Call::Circle(center, radius, color));
    }
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, align: Align) {
        self.calls.push(Call::Text(x, y, text.to_string(), color, align));
    }
}

impl Recorder {
    fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(_, _, t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn recorded(state: &GameState) -> Recorder {
    let mut rec = Recorder::default();
    render(&mut rec, state);
    rec
}

// ── Scene ─────────────────────────────────────────────────────────────────────

#[test]
fn frame_starts_with_clear() {
    let rec = recorded(&init_state());
    assert_eq!(rec.calls[0], Call::Clear(C_BACKGROUND));
}

#[test]
fn fresh_game_draws_every_alien_with_eyes() {
    let rec = recorded(&init_state());
    let bodies = rec
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Rect(_, color, 5) if C_ALIENS.contains(color)))
        .count();
    let circles = rec.calls.iter().filter(|c| matches!(c, Call::Circle(..))).count();
    assert_eq!(bodies, 50);
    assert_eq!(circles, 50 * 4);
}

#[test]
fn alien_colour_follows_kind() {
    let mut state = init_state();
    state.aliens = vec![Alien { x: 100, y: 50, kind: AlienKind::Top }];
    let rec = recorded(&state);
    assert!(rec
        .calls
        .contains(&Call::Rect(Rect::new(100, 50, 40, 30), C_ALIENS[2], 5)));
    assert!(rec.calls.contains(&Call::Circle((112, 58), 5, C_EYE)));
    assert!(rec.calls.contains(&Call::Circle((128, 58), 2, C_PUPIL)));
}

#[test]
fn player_is_a_triangle() {
    let rec = recorded(&init_state());
    assert!(rec
        .calls
        .contains(&Call::Polygon(vec![(400, 540), (375, 570), (425, 570)], C_PLAYER)));
}

#[test]
fn bullets_use_owner_colours() {
    let mut state = init_state();
    state.bullets = vec![
        Bullet { x: 10, y: 20, owner: BulletOwner::Player },
        Bullet { x: 30, y: 40, owner: BulletOwner::Alien },
    ];
    let rec = recorded(&state);
    assert!(rec.calls.contains(&Call::Rect(Rect::new(10, 20, 4, 15), C_BULLET_PLAYER, 0)));
    assert!(rec.calls.contains(&Call::Rect(Rect::new(30, 40, 4, 15), C_BULLET_ALIEN, 0)));
}

#[test]
fn hud_shows_score_lives_and_hint() {
    let mut state = init_state();
    state.score = 230;
    state.lives = 2;
    let rec = recorded(&state);
    let texts = rec.texts();
    assert!(texts.contains(&"Score: 230"));
    assert!(texts.contains(&"Lives: 2"));
    assert!(texts.contains(&TITLE));
    assert!(rec.calls.contains(&Call::Text(400, 10, TITLE.to_string(), C_TEXT, Align::Center)));
    assert!(texts.contains(&CONTROLS_HINT));
    assert!(!texts.contains(&"GAME OVER"));
}

#[test]
fn game_over_overlay() {
    let mut state = init_state();
    state.status = GameStatus::GameOver;
    state.score = 120;
    let texts_owner = recorded(&state);
    let texts = texts_owner.texts();
    assert!(texts.contains(&"GAME OVER"));
    assert!(texts.contains(&"Final Score: 120"));
    assert!(texts.contains(&"R - Play Again  Q - Quit"));
}

#[test]
fn victory_overlay() {
    let mut state = init_state();
    state.aliens.clear();
    state.status = GameStatus::Victory;
    let rec = recorded(&state);
    let texts = rec.texts();
    assert!(texts.contains(&"VICTORY!"));
    assert!(!texts.contains(&"GAME OVER"));
}

// ── Surface ───────────────────────────────────────────────────────────────────

const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };

#[test]
fn surface_dimensions() {
    let s = Surface::new(80, 24);
    assert_eq!(s.pixel_width(), 80);
    assert_eq!(s.pixel_height(), 48);
    assert_eq!(s.pixel(80, 0), None);
    assert_eq!(s.pixel(0, 48), None);
    assert_eq!(s.pixel(79, 47), Some(Color::Black));
}

#[test]
fn thin_rect_is_never_lost() {
    // 10×12.5 world units per pixel: a 4-wide bullet still paints.
    let mut s = Surface::new(80, 24);
    s.fill_rect(Rect::new(398, 530, 4, 15), C_BULLET_PLAYER, 0);
    assert_eq!(s.pixel(39, 42), Some(C_BULLET_PLAYER));
    assert_eq!(s.pixel(40, 43), Some(C_BULLET_PLAYER));
    assert_eq!(s.pixel(41, 42), Some(Color::Black));
    assert_eq!(s.pixel(39, 44), Some(Color::Black));
}

#[test]
fn rounded_corners_at_full_resolution() {
    // 800×300 cells → one pixel per world unit.
    let mut s = Surface::new(800, 300);
    s.fill_rect(Rect::new(100, 100, 40, 30), RED, 5);
    assert_eq!(s.pixel(100, 100), Some(Color::Black));
    assert_eq!(s.pixel(139, 129), Some(Color::Black));
    assert_eq!(s.pixel(120, 115), Some(RED));
    assert_eq!(s.pixel(100, 115), Some(RED));

    s.fill_rect(Rect::new(200, 100, 40, 30), RED, 0);
    assert_eq!(s.pixel(200, 100), Some(RED));
}

#[test]
fn rounding_skipped_when_pixels_are_coarse() {
    let mut s = Surface::new(80, 24);
    s.fill_rect(Rect::new(100, 50, 40, 30), RED, 5);
    let (px, py) = s.pixel_at(100, 50);
    assert_eq!(s.pixel(px, py), Some(RED));
}

#[test]
fn circle_fills_its_disc() {
    let mut s = Surface::new(800, 300);
    s.fill_circle((400, 300), 5, C_EYE);
    assert_eq!(s.pixel(400, 300), Some(C_EYE));
    assert_eq!(s.pixel(396, 300), Some(C_EYE));
    assert_eq!(s.pixel(406, 300), Some(Color::Black));
    assert_eq!(s.pixel(404, 304), Some(Color::Black));
}

#[test]
fn triangle_fills_inside_only() {
    let mut s = Surface::new(800, 300);
    s.fill_polygon(&[(400, 540), (375, 570), (425, 570)], C_PLAYER);
    assert_eq!(s.pixel(400, 565), Some(C_PLAYER));
    assert_eq!(s.pixel(400, 545), Some(C_PLAYER));
    assert_eq!(s.pixel(376, 541), Some(Color::Black));
    assert_eq!(s.pixel(424, 545), Some(Color::Black));
}

#[test]
fn degenerate_polygon_is_ignored() {
    let mut s = Surface::new(80, 24);
    s.fill_polygon(&[(0, 0), (100, 100)], RED);
    assert!((0..48).all(|y| (0..80).all(|x| s.pixel(x, y) == Some(Color::Black))));
}

#[test]
fn text_alignment() {
    let mut s = Surface::new(80, 24);
    s.draw_text(10, 10, "Score: 0", C_TEXT, Align::Left);
    s.draw_text(790, 10, "Lives: 3", C_TEXT, Align::Right);
    s.draw_text(400, 300, "ABCD", C_TEXT, Align::Center);

    assert_eq!(s.glyph(1, 0), Some('S'));
    assert_eq!(s.glyph(71, 0), Some('L'));
    assert_eq!(s.glyph(78, 0), Some('3'));
    assert_eq!(s.glyph(79, 0), None);
    assert_eq!(s.glyph(38, 12), Some('A'));
    assert_eq!(s.glyph(41, 12), Some('D'));
}

#[test]
fn text_is_clipped_to_the_surface() {
    let mut s = Surface::new(40, 12);
    s.draw_text(790, 10, "overflowing", C_TEXT, Align::Left);
    s.draw_text(10, 700, "below", C_TEXT, Align::Left);
    assert_eq!(s.glyph(39, 0), Some('o'));
    assert_eq!(s.glyph(40, 0), None);
}

#[test]
fn clear_wipes_pixels_and_text() {
    let mut s = Surface::new(80, 24);
    s.fill_rect(Rect::new(0, 0, 800, 600), RED, 0);
    s.draw_text(10, 10, "x", C_TEXT, Align::Left);
    s.clear(Color::Black);
    assert_eq!(s.pixel(5, 5), Some(Color::Black));
    assert_eq!(s.glyph(1, 0), None);
}

#[test]
fn present_writes_text_and_half_blocks() {
    let mut s = Surface::new(40, 12);
    s.draw_text(0, 0, "Hi", C_TEXT, Align::Left);
    let mut out: Vec<u8> = Vec::new();
    s.present(&mut out).expect("writing to a Vec cannot fail");
    let text = String::from_utf8(out).expect("output is utf-8");
    assert!(text.contains("Hi"));
    assert!(text.contains('▀'));
}

#[test]
fn rendered_game_lands_on_surface() {
    let mut s = Surface::new(80, 24);
    render(&mut s, &init_state());
    assert_eq!(s.glyph(1, 0), Some('S'));
    // Title centred on column 40, between score and lives.
    assert_eq!(s.glyph(33, 0), Some('S'));
    assert_eq!(s.glyph(40, 0), Some('N'));
    assert_eq!(s.glyph(71, 0), Some('L'));
    assert!(s.glyph(40, 23).is_some()); // controls hint on the last row

    // Lower-right of the top-left alien, clear of its eyes; top row is red.
    let (px, py) = s.pixel_at(135, 70);
    assert_eq!(s.pixel(px, py), Some(C_ALIENS[2]));
}
