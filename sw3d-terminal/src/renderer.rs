/// Character-cell surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use sw3d_core::{ScreenPoint, Surface};

use crate::color;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are about twice as tall as wide.
const PIXELS_PER_ROW: usize = 2;

/// Circle radii arrive in canvas pixels; a cell is much coarser.
const CIRCLE_SCALE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// A [`Surface`] over a grid of terminal cells
///
/// The virtual pixel grid is one pixel per column and two per row, so the
/// pipeline's aspect ratio matches what appears on screen. Later draws
/// overwrite earlier ones, which is what the painter's algorithm expects.
pub struct TerminalSurface {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![BLANK; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Resize the grid, dropping its contents.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![BLANK; columns * rows];
    }

    /// Glyph at a cell, for tests and overlays.
    pub fn glyph(&self, column: usize, row: usize) -> Option<char> {
        (column < self.columns && row < self.rows).then(|| self.cells[row * self.columns + column].glyph)
    }

    /// Write a string straight into the grid, clipped at the right edge.
    pub fn put_str(&mut self, column: usize, row: usize, text: &str, color: Color) {
        if row >= self.rows {
            return;
        }
        for (offset, glyph) in text.chars().enumerate() {
            let x = column.saturating_add(offset);
            if x >= self.columns {
                break;
            }
            self.cells[row * self.columns + x] = Cell { glyph, color };
        }
    }

    /// Screen point (centre origin, y down) to virtual pixel coordinates.
    fn to_pixel(&self, point: ScreenPoint) -> (f64, f64) {
        (
            point.x + self.columns as f64 / 2.0,
            point.y + (self.rows * PIXELS_PER_ROW) as f64 / 2.0,
        )
    }

    fn plot(&mut self, px: i64, py: i64, cell: Cell) {
        if px < 0 || py < 0 {
            return;
        }
        let (column, row) = (px as usize, py as usize / PIXELS_PER_ROW);
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column] = cell;
        }
    }

    /// Pixel rows and columns covering `min..=max`, clipped to the grid.
    fn clip_span(min: f64, max: f64, limit: usize) -> Option<(i64, i64)> {
        let low = min.floor().max(0.0) as i64;
        let high = max.ceil().min(limit as f64 - 1.0) as i64;
        (limit > 0 && low <= high).then_some((low, high))
    }

    /// Queue the grid to `writer`, starting at terminal row `top`.
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        for (row, line) in self.cells.chunks(self.columns.max(1)).enumerate() {
            writer.queue(cursor::MoveTo(0, top + row as u16))?;

            let mut current = None;
            for cell in line {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> u32 {
        self.columns as u32
    }

    fn height(&self) -> u32 {
        (self.rows * PIXELS_PER_ROW) as u32
    }

    fn fill_triangle(&mut self, p1: ScreenPoint, p2: ScreenPoint, p3: ScreenPoint, color: &str) {
        let rgb = color::parse_rgb(color).unwrap_or((255, 255, 255));
        let cell = Cell {
            glyph: shade(color::luminance(rgb)),
            color: color::to_terminal_color(color),
        };

        let v0 = self.to_pixel(p1);
        let v1 = self.to_pixel(p2);
        let v2 = self.to_pixel(p3);

        let Some((min_x, max_x)) =
            Self::clip_span(v0.0.min(v1.0).min(v2.0), v0.0.max(v1.0).max(v2.0), self.columns)
        else {
            return;
        };
        let Some((min_y, max_y)) = Self::clip_span(
            v0.1.min(v1.1).min(v2.1),
            v0.1.max(v1.1).max(v2.1),
            self.rows * PIXELS_PER_ROW,
        ) else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);

                // Either winding counts as inside
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, cell);
                    }
                }
            }
        }

        // The outline keeps slivers visible, as a stroked canvas path would.
        for (from, to) in [(p1, p2), (p2, p3), (p3, p1)] {
            self.rasterize_line(from, to, cell);
        }
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint, _width: f64, color: &str) {
        let (x0, y0) = self.to_pixel(from);
        let (x1, y1) = self.to_pixel(to);
        let cell = Cell {
            glyph: line_glyph(x1 - x0, (y1 - y0) / PIXELS_PER_ROW as f64),
            color: color::to_terminal_color(color),
        };
        self.rasterize_line(from, to, cell);
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &str) {
        if radius <= 0.0 {
            return;
        }
        let cell = Cell {
            glyph: '@',
            color: color::to_terminal_color(color),
        };

        let (cx, cy) = self.to_pixel(center);
        let r = (radius * CIRCLE_SCALE).max(0.5);

        let Some((min_x, max_x)) = Self::clip_span(cx - r, cx + r, self.columns) else {
            return;
        };
        let Some((min_y, max_y)) = Self::clip_span(cy - r, cy + r, self.rows * PIXELS_PER_ROW) else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.plot(x, y, cell);
                }
            }
        }
    }

    fn fill_text(&mut self, position: ScreenPoint, text: &str, color: &str, _font: &str) {
        let (x, y) = self.to_pixel(position);
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return;
        }
        let color = color::to_terminal_color(color);
        self.put_str(x as usize, y as usize / PIXELS_PER_ROW, text, color);
    }
}

impl TerminalSurface {
    /// DDA line between two screen points, clipped to the pixel grid first.
    fn rasterize_line(&mut self, from: ScreenPoint, to: ScreenPoint, cell: Cell) {
        let start = self.to_pixel(from);
        let end = self.to_pixel(to);
        if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
            return;
        }

        let bounds = (self.columns as f64, (self.rows * PIXELS_PER_ROW) as f64);
        let Some(((x0, y0), (x1, y1))) = clip_segment(start, end, bounds) else {
            return;
        };

        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i64;
        let (dx, dy) = ((x1 - x0) / steps as f64, (y1 - y0) / steps as f64);

        for i in 0..=steps {
            let x = x0 + dx * i as f64;
            let y = y0 + dy * i as f64;
            self.plot(x.floor() as i64, y.floor() as i64, cell);
        }
    }
}

/// Liang-Barsky clip of `p0..p1` to `[0, width] x [0, height]`.
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    (width, height): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-dx, p0.0), (dx, width - p0.0), (-dy, p0.1), (dy, height - p0.1)] {
        if p == 0.0 {
            // Parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            exit = exit.min(t);
        }
        if enter > exit {
            return None;
        }
    }

    Some((
        (p0.0 + enter * dx, p0.1 + enter * dy),
        (p0.0 + exit * dx, p0.1 + exit * dy),
    ))
}

/// Ramp glyph for a brightness in `0.0..=1.0`; anything lit gets at least '.'.
fn shade(brightness: f64) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f64).round() as usize;
    LUMINOSITY_RAMP[index.clamp(1, last)]
}

/// Glyph following a line's direction, measured in cells.
fn line_glyph(dx: f64, dy: f64) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_pixel_size() {
        let surface = TerminalSurface::new(80, 24);
        assert_eq!(surface.width(), 80);
        assert_eq!(surface.height(), 48);
    }

    #[test]
    fn test_fill_triangle_covers_centre() {
        let mut surface = TerminalSurface::new(40, 20);
        surface.fill_triangle(
            ScreenPoint::new(-10.0, -10.0),
            ScreenPoint::new(10.0, -10.0),
            ScreenPoint::new(0.0, 10.0),
            "white",
        );

        assert_eq!(surface.glyph(20, 10), Some('@'));
        assert_eq!(surface.glyph(0, 0), Some(' '));
    }

    #[test]
    fn test_dim_triangle_uses_dim_glyph() {
        let mut surface = TerminalSurface::new(40, 20);
        surface.fill_triangle(
            ScreenPoint::new(-10.0, -10.0),
            ScreenPoint::new(10.0, -10.0),
            ScreenPoint::new(0.0, 10.0),
            "rgb(20,20,20)",
        );
        assert_eq!(surface.glyph(20, 10), Some('.'));
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut surface = TerminalSurface::new(10, 5);
        surface.fill_triangle(
            ScreenPoint::new(100.0, 100.0),
            ScreenPoint::new(120.0, 100.0),
            ScreenPoint::new(110.0, 130.0),
            "white",
        );
        surface.fill_circle(ScreenPoint::new(-500.0, 0.0), 10.0, "yellow");
        surface.stroke_line(ScreenPoint::new(-100.0, 0.0), ScreenPoint::new(100.0, 0.0), 1.0, "white");

        assert_eq!(surface.glyph(0, 2), Some('-'));
        assert_eq!(surface.glyph(9, 2), Some('-'));
        assert_eq!(surface.glyph(5, 0), Some(' '));
    }

    #[test]
    fn test_far_line_is_clipped_to_grid() {
        let mut surface = TerminalSurface::new(10, 5);
        surface.stroke_line(ScreenPoint::new(-1e10, 0.0), ScreenPoint::new(1e10, 0.0), 1.0, "white");
        surface.stroke_line(ScreenPoint::new(-1e12, -3e11), ScreenPoint::new(2e12, 7e11), 1.0, "white");

        assert_eq!(surface.glyph(0, 2), Some('-'));
        assert_eq!(surface.glyph(9, 2), Some('-'));
    }

    #[test]
    fn test_far_triangle_outline_is_clipped() {
        let mut surface = TerminalSurface::new(10, 5);
        surface.fill_triangle(
            ScreenPoint::new(-1e10, -1e10),
            ScreenPoint::new(1e10, -1e10),
            ScreenPoint::new(0.0, 1e10),
            "white",
        );
        assert_eq!(surface.glyph(5, 2), Some('@'));
    }

    #[test]
    fn test_clip_segment() {
        let bounds = (10.0, 10.0);
        assert_eq!(
            clip_segment((-5.0, 5.0), (15.0, 5.0), bounds),
            Some(((0.0, 5.0), (10.0, 5.0)))
        );
        assert_eq!(clip_segment((-5.0, -1.0), (15.0, -1.0), bounds), None);
        assert_eq!(clip_segment((20.0, 0.0), (30.0, 10.0), bounds), None);
        assert_eq!(
            clip_segment((2.0, 3.0), (4.0, 5.0), bounds),
            Some(((2.0, 3.0), (4.0, 5.0)))
        );
    }

    #[test]
    fn test_text_and_circle() {
        let mut surface = TerminalSurface::new(20, 10);
        surface.fill_circle(ScreenPoint::new(0.0, 0.0), 10.0, "yellow");
        surface.fill_text(ScreenPoint::new(-10.0, -10.0), "12", "royalblue", "30px Arial");

        assert_eq!(surface.glyph(10, 5), Some('@'));
        assert_eq!(surface.glyph(0, 0), Some('1'));
        assert_eq!(surface.glyph(1, 0), Some('2'));
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_glyph(10.0, 0.0), '-');
        assert_eq!(line_glyph(0.0, 10.0), '|');
        assert_eq!(line_glyph(5.0, 5.0), '\\');
        assert_eq!(line_glyph(5.0, -5.0), '/');
    }

    #[test]
    fn test_draw_positions_rows() {
        let mut surface = TerminalSurface::new(3, 2);
        surface.put_str(0, 1, "abc", Color::White);

        let mut out = Vec::new();
        surface.draw(&mut out, 1).unwrap();
        let out = String::from_utf8(out).unwrap();

        // cursor positions are 1-based on the wire
        assert!(out.contains("\x1b[2;1H"));
        assert!(out.contains("\x1b[3;1H"));
        assert!(out.contains("abc"));
    }
}
