use crossterm::style::Color;

use crate::entities::Rect;

/// Where a text anchor sits relative to the rendered string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Drawing primitives in world coordinates (800×600, origin top-left).
///
/// Scene code only talks to this trait; the terminal surface is one
/// implementation, tests record calls with another.
pub trait Canvas {
    fn clear(&mut self, color: Color);

    /// Filled box; `radius > 0` rounds the corners.
    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32);

    /// Filled simple polygon, vertices in order.
    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color);

    fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: Color);

    /// Single line of text anchored at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, align: Align);
}
