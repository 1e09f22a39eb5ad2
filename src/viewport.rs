//! Pointer-to-cell resolution, pan and zoom.
//!
//! Window pixels have a top-left origin; the world is drawn from the
//! bottom-left. Pan offsets are kept in base-cell pixels so they stay put
//! when the zoom level changes.

use crate::config::{BASE_CELL_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};

/// A resolved world cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub window_width: u32,
    pub window_height: u32,
    /// On-screen size of one cell in pixels, never below 1.
    pub cell_size: u32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT, BASE_CELL_SIZE)
    }
}

impl Viewport {
    pub fn new(window_width: u32, window_height: u32, cell_size: u32) -> Self {
        Viewport {
            window_width,
            window_height,
            cell_size: cell_size.max(1),
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Flip a window y coordinate to a bottom-left origin.
    #[inline]
    pub fn flip_y(&self, y: i32) -> i32 {
        (self.window_height as i32 - 1) - y
    }

    /// Resolve a window pixel to a cell of a `width` × `height` world.
    ///
    /// Returns `None` when the pointer is outside the drawn world.
    pub fn resolve(&self, x: i32, y: i32, width: usize, height: usize) -> Option<CellPos> {
        let y = self.flip_y(y);
        let base = BASE_CELL_SIZE as f32;
        let size = self.cell_size as f32;

        let row = (y as f32 / size - self.pan_y / base).floor();
        let col = (x as f32 / size - self.pan_x / base).floor();
        if row < 0.0 || col < 0.0 {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        if row >= height || col >= width {
            return None;
        }
        Some(CellPos { row, col })
    }

    /// Pan by a pointer delta in window pixels (y already bottom-up).
    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        let scale = BASE_CELL_SIZE as f32 / self.cell_size as f32;
        self.pan_x += dx as f32 * scale;
        self.pan_y += dy as f32 * scale;
    }

    /// Apply scroll steps: positive zooms in one pixel per step, negative zooms out.
    pub fn zoom(&mut self, steps: i32) {
        if steps >= 0 {
            self.cell_size = self.cell_size.saturating_add(steps as u32);
        } else {
            let shrink = steps.unsigned_abs();
            self.cell_size = self.cell_size.saturating_sub(shrink).max(1);
        }
    }

    /// Uniform scale the renderer applies to the world quad.
    pub fn scale(&self) -> f32 {
        self.cell_size as f32 / BASE_CELL_SIZE as f32
    }
}
