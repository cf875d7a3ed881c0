//! Drawing surface abstraction
//!
//! Every UI component draws through the [`Surface`] trait instead of talking
//! to an SDL2 canvas directly. The real game passes its
//! `Canvas<Window>`; tests pass a recording surface and inspect exactly which
//! rectangles were filled, which is how hit-test geometry is checked against
//! draw-time geometry without an SDL2 context.
//!
//! # Usage Example
//!
//! ```ignore
//! let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
//! building_panel.draw(&mut canvas)?;
//! context_menu.draw(&mut canvas)?;
//! ```

use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{Canvas, RenderTarget};

/// Immediate-mode drawing target used by the UI components.
///
/// The method set mirrors the subset of `sdl2::render::Canvas` the UI needs,
/// with the same `Result<(), String>` error convention.
pub trait Surface {
    /// Sets the color used by the following fill/outline/line calls
    fn set_draw_color(&mut self, color: Color);

    /// Fills a rectangle with the current draw color
    fn fill_rect(&mut self, rect: Rect) -> Result<(), String>;

    /// Outlines a rectangle (1 px) with the current draw color
    fn draw_rect(&mut self, rect: Rect) -> Result<(), String>;

    /// Draws a 1 px line with the current draw color
    fn draw_line(&mut self, start: Point, end: Point) -> Result<(), String>;

    /// Drawable area in pixels (logical size when one is set)
    fn size(&self) -> (u32, u32);
}

impl<T: RenderTarget> Surface for Canvas<T> {
    fn set_draw_color(&mut self, color: Color) {
        Canvas::set_draw_color(self, color);
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), String> {
        Canvas::fill_rect(self, rect)
    }

    fn draw_rect(&mut self, rect: Rect) -> Result<(), String> {
        Canvas::draw_rect(self, rect)
    }

    fn draw_line(&mut self, start: Point, end: Point) -> Result<(), String> {
        Canvas::draw_line(self, start, end)
    }

    fn size(&self) -> (u32, u32) {
        // logical_size() is (0, 0) until set_logical_size() has been called
        match self.logical_size() {
            (0, 0) => self.output_size().unwrap_or_default(),
            size => size,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{DrawOp, RecordingSurface};
    use super::*;

    #[test]
    fn test_recording_surface_tracks_color() {
        let mut surface = RecordingSurface::new(100, 100);
        surface.set_draw_color(Color::RGB(1, 2, 3));
        surface.fill_rect(Rect::new(0, 0, 10, 10)).unwrap();
        surface.set_draw_color(Color::RGB(4, 5, 6));
        surface.draw_rect(Rect::new(0, 0, 10, 10)).unwrap();

        assert_eq!(
            surface.ops,
            vec![
                DrawOp::Fill(Rect::new(0, 0, 10, 10), Color::RGB(1, 2, 3)),
                DrawOp::Outline(Rect::new(0, 0, 10, 10), Color::RGB(4, 5, 6)),
            ]
        );
        assert_eq!(surface.size(), (100, 100));
    }
}
