//! Placement grid
//!
//! The lattice that building pieces snap to. Spacing and offset are whole
//! pixels, so every snapped coordinate is an exact integer and two pieces
//! dropped on the same cell always compare equal.

use crate::error::UiError;
use crate::render::Surface;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Grid settings as stored in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub spacing: (u32, u32),
    pub offset: (i32, i32),
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            spacing: (40, 40),
            offset: (0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    spacing: (u32, u32),
    offset: (i32, i32),
}

impl Grid {
    /// Creates a grid, rejecting a zero spacing on either axis
    pub fn new(spacing: (u32, u32), offset: (i32, i32)) -> Result<Self, UiError> {
        if spacing.0 == 0 || spacing.1 == 0 {
            return Err(UiError::InvalidGrid { spacing });
        }
        Ok(Grid { spacing, offset })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self, UiError> {
        Grid::new(config.spacing, config.offset)
    }

    pub fn spacing(&self) -> (u32, u32) {
        self.spacing
    }

    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    /// Nearest lattice point to `point`, each axis snapped independently
    pub fn snap(&self, point: Point) -> Point {
        Point::new(
            snap_axis(point.x(), self.offset.0, self.spacing.0),
            snap_axis(point.y(), self.offset.1, self.spacing.1),
        )
    }

    /// Moves the lattice origin (camera pan)
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    /// Rescales the cell size, never below 1 px
    pub fn zoom(&mut self, factor: f32) {
        let scale = |value: u32| ((value as f32 * factor).round() as u32).max(1);
        self.spacing = (scale(self.spacing.0), scale(self.spacing.1));
    }

    /// Draws the lattice lines that fall inside `bounds`
    pub fn draw(&self, surface: &mut dyn Surface, bounds: Rect, color: Color) -> Result<(), String> {
        surface.set_draw_color(color);

        let (sx, sy) = (self.spacing.0 as i32, self.spacing.1 as i32);
        let first_x = bounds.left() + (self.offset.0 - bounds.left()).rem_euclid(sx);
        let first_y = bounds.top() + (self.offset.1 - bounds.top()).rem_euclid(sy);

        for x in (first_x..bounds.right()).step_by(sx as usize) {
            surface.draw_line(Point::new(x, bounds.top()), Point::new(x, bounds.bottom() - 1))?;
        }
        for y in (first_y..bounds.bottom()).step_by(sy as usize) {
            surface.draw_line(Point::new(bounds.left(), y), Point::new(bounds.right() - 1, y))?;
        }

        Ok(())
    }
}

/// `round((p - offset) / spacing) * spacing + offset`, ties away from zero
fn snap_axis(p: i32, offset: i32, spacing: u32) -> i32 {
    let spacing = spacing as f64;
    let cells = ((p - offset) as f64 / spacing).round();
    (cells * spacing) as i32 + offset
}
