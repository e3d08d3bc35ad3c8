//! Background level grid: one tile index repeated across the viewport.

use crate::core::constants::{BACKGROUND_TILE_INDEX, SPRITE_SIZE};

/// Build a `height` x `width` grid filled with `tile`.
pub fn level_array(width: usize, height: usize, tile: u16) -> Vec<Vec<u16>> {
    vec![vec![tile; width]; height]
}

/// Number of tile columns and rows needed to cover the viewport, rounding up
/// so partial tiles at the edges are still drawn.
pub fn level_dimensions(viewport_width: u32, viewport_height: u32, tile_size: u32) -> (usize, usize) {
    let tile_size = tile_size.max(1);
    (
        viewport_width.div_ceil(tile_size) as usize,
        viewport_height.div_ceil(tile_size) as usize,
    )
}

/// A tile layer placed at the world origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    data: Vec<Vec<u16>>,
    tile_width: u32,
    tile_height: u32,
}

impl TileLayer {
    pub fn new(data: Vec<Vec<u16>>, tile_width: u32, tile_height: u32) -> Self {
        Self {
            data,
            tile_width: tile_width.max(1),
            tile_height: tile_height.max(1),
        }
    }

    /// The background layer for a viewport, built from the shared tile index.
    pub fn background(viewport_width: u32, viewport_height: u32) -> Self {
        let (cols, rows) = level_dimensions(viewport_width, viewport_height, SPRITE_SIZE);
        Self::new(
            level_array(cols, rows, BACKGROUND_TILE_INDEX),
            SPRITE_SIZE,
            SPRITE_SIZE,
        )
    }

    pub fn columns(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Tile under a world-space point, if any.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<u16> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.tile_width as f64) as usize;
        let row = (y / self.tile_height as f64) as usize;
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Column/row of the tile under a world-space point, used for checkering.
    pub fn cell_at(&self, x: f64, y: f64) -> (usize, usize) {
        (
            (x.max(0.0) / self.tile_width as f64) as usize,
            (y.max(0.0) / self.tile_height as f64) as usize,
        )
    }
}
