//! Terminal render surface.
//!
//! Every terminal cell holds two vertically stacked "pixels" drawn with the
//! upper-half-block glyph (`▀`): the foreground colour paints the top pixel,
//! the background colour the bottom one.  The 800×600 world is scaled onto
//! that `cols × rows·2` grid.  Text is kept in a separate per-cell layer and
//! wins over pixels when the frame is presented.

use std::io::Write;
use std::ops::Range;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use super::canvas::{Align, Canvas};
use crate::compute::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::Rect;
use crate::error::GameError;

const HALF_BLOCK: char = '▀';

#[derive(Clone, Debug)]
pub struct Surface {
    cols: u16,
    rows: u16,
    background: Color,
    /// `cols × rows·2` pixels, row-major.
    pixels: Vec<Color>,
    /// One optional glyph per terminal cell, drawn over the pixels.
    glyphs: Vec<Option<(char, Color)>>,
}

impl Surface {
    pub fn new(cols: u16, rows: u16) -> Self {
        let background = Color::Black;
        let cells = cols as usize * rows as usize;
        Surface {
            cols,
            rows,
            background,
            pixels: vec![background; cells * 2],
            glyphs: vec![None; cells],
        }
    }

    pub fn pixel_width(&self) -> usize {
        self.cols as usize
    }

    pub fn pixel_height(&self) -> usize {
        self.rows as usize * 2
    }

    /// Colour of pixel `(px, py)`, `None` when off-surface.
    pub fn pixel(&self, px: usize, py: usize) -> Option<Color> {
        if px >= self.pixel_width() || py >= self.pixel_height() {
            return None;
        }
        Some(self.pixels[py * self.pixel_width() + px])
    }

    /// Glyph drawn in terminal cell `(col, row)`, if any.
    pub fn glyph(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.glyphs[row as usize * self.cols as usize + col as usize].map(|(ch, _)| ch)
    }

    /// Pixel that contains world point `(x, y)`.
    pub fn pixel_at(&self, x: i32, y: i32) -> (usize, usize) {
        let px = (x as f32 * self.scale_x()).floor().max(0.0) as usize;
        let py = (y as f32 * self.scale_y()).floor().max(0.0) as usize;
        (
            px.min(self.pixel_width().saturating_sub(1)),
            py.min(self.pixel_height().saturating_sub(1)),
        )
    }

    /// Write the whole frame to `out` and flush.
    pub fn present<W: Write>(&self, out: &mut W) -> Result<(), GameError> {
        let width = self.pixel_width();
        let mut fg: Option<Color> = None;
        let mut bg: Option<Color> = None;

        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let top = row as usize * 2 * width;
            let bottom = top + width;
            for col in 0..self.cols as usize {
                let (ch, f, b) = match self.glyphs[row as usize * width + col] {
                    Some((ch, color)) => (ch, color, self.background),
                    None => (HALF_BLOCK, self.pixels[top + col], self.pixels[bottom + col]),
                };
                if fg != Some(f) {
                    out.queue(style::SetForegroundColor(f))?;
                    fg = Some(f);
                }
                if bg != Some(b) {
                    out.queue(style::SetBackgroundColor(b))?;
                    bg = Some(b);
                }
                out.queue(Print(ch))?;
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Pixels per world unit, horizontally.
    fn scale_x(&self) -> f32 {
        self.pixel_width() as f32 / SCREEN_WIDTH as f32
    }

    /// Pixels per world unit, vertically.
    fn scale_y(&self) -> f32 {
        self.pixel_height() as f32 / SCREEN_HEIGHT as f32
    }

    /// World-space centre of a pixel.
    fn pixel_center(&self, px: usize, py: usize) -> (f32, f32) {
        (
            (px as f32 + 0.5) / self.scale_x(),
            (py as f32 + 0.5) / self.scale_y(),
        )
    }

    /// Every pixel index touched by the world interval `[lo, hi)`.
    fn span(lo: f32, hi: f32, scale: f32, limit: usize) -> Range<usize> {
        let start = (lo * scale).floor().max(0.0) as usize;
        let end = (hi * scale).ceil().max(0.0) as usize;
        start.min(limit)..end.min(limit)
    }

    fn set(&mut self, px: usize, py: usize, color: Color) {
        let width = self.pixel_width();
        if px < width && py < self.pixel_height() {
            self.pixels[py * width + px] = color;
        }
    }
}

impl Canvas for Surface {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.pixels.fill(color);
        self.glyphs.fill(None);
    }

    /// Conservative fill: any pixel the box touches is painted, so thin
    /// shapes such as bullets never vanish at low resolution.  Corners are
    /// only rounded once a pixel is smaller than the radius.
    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32) {
        let xs = Self::span(rect.x as f32, rect.right() as f32, self.scale_x(), self.pixel_width());
        let ys = Self::span(rect.y as f32, rect.bottom() as f32, self.scale_y(), self.pixel_height());

        let r = radius.min(rect.w / 2).min(rect.h / 2).max(0) as f32;
        let round = r > 0.0 && 1.0 / self.scale_x() <= r && 1.0 / self.scale_y() <= r;
        let (left, top) = (rect.x as f32, rect.y as f32);
        let (right, bottom) = (rect.right() as f32, rect.bottom() as f32);

        for py in ys {
            for px in xs.clone() {
                if round {
                    let (cx, cy) = self.pixel_center(px, py);
                    let cx = cx.clamp(left, right);
                    let cy = cy.clamp(top, bottom);
                    let kx = cx.clamp(left + r, right - r);
                    let ky = cy.clamp(top + r, bottom - r);
                    if (cx - kx).powi(2) + (cy - ky).powi(2) > r * r {
                        continue;
                    }
                }
                self.set(px, py, color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_x = points.iter().map(|p| p.0).min().unwrap_or(0) as f32;
        let max_x = points.iter().map(|p| p.0).max().unwrap_or(0) as f32;
        let min_y = points.iter().map(|p| p.1).min().unwrap_or(0) as f32;
        let max_y = points.iter().map(|p| p.1).max().unwrap_or(0) as f32;

        let xs = Self::span(min_x, max_x, self.scale_x(), self.pixel_width());
        let ys = Self::span(min_y, max_y, self.scale_y(), self.pixel_height());
        for py in ys {
            for px in xs.clone() {
                let (cx, cy) = self.pixel_center(px, py);
                if point_in_polygon(cx, cy, points) {
                    self.set(px, py, color);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: Color) {
        let (ox, oy) = (center.0 as f32, center.1 as f32);
        let r = radius.max(0) as f32;
        let xs = Self::span(ox - r, ox + r, self.scale_x(), self.pixel_width());
        let ys = Self::span(oy - r, oy + r, self.scale_y(), self.pixel_height());
        for py in ys {
            for px in xs.clone() {
                let (cx, cy) = self.pixel_center(px, py);
                if (cx - ox).powi(2) + (cy - oy).powi(2) <= r * r {
                    self.set(px, py, color);
                }
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, align: Align) {
        let len = text.chars().count() as i32;
        let anchor = (x as f32 * self.cols as f32 / SCREEN_WIDTH as f32).floor() as i32;
        let row = (y as f32 * self.rows as f32 / SCREEN_HEIGHT as f32).floor() as i32;
        if row < 0 || row >= self.rows as i32 {
            return;
        }
        let start = match align {
            Align::Left => anchor,
            Align::Center => anchor - len / 2,
            Align::Right => anchor - len,
        };
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i32;
            if col < 0 || col >= self.cols as i32 {
                continue;
            }
            self.glyphs[row as usize * self.cols as usize + col as usize] = Some((ch, color));
        }
    }
}

/// Crossing-number test against the polygon's edges.
fn point_in_polygon(x: f32, y: f32, points: &[(i32, i32)]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (points[i].0 as f32, points[i].1 as f32);
        let (xj, yj) = (points[j].0 as f32, points[j].1 as f32);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
