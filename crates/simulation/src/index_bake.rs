//! Tile index bake.
//!
//! For each map cell, bucket the normalized height into one of the palette's
//! bands and record `(tileX, tileY, height, 0)`. The resulting grid is written
//! once per palette and read by every later pass (color pass, voxel builder,
//! water refraction); nothing mutates it after the bake.

use bevy::prelude::*;

use crate::config::{HEIGHT_SAMPLE_RANGE, PALETTE_SIZE};
use crate::error::SetupError;
use crate::float_grid::Grid4;
use crate::height_field::HeightField;
use crate::palette::{Palette, TileCoord};

/// Lane layout of a tile index texel.
pub const LANE_TILE_X: usize = 0;
pub const LANE_TILE_Y: usize = 1;
pub const LANE_HEIGHT: usize = 2;
pub const LANE_RESERVED: usize = 3;

/// Per-cell tile lookup table for the whole map.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileIndexGrid {
    pub grid: Grid4,
}

impl TileIndexGrid {
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Sheet tile assigned to cell `(x, y)`.
    pub fn tile(&self, x: usize, y: usize) -> TileCoord {
        let t = self.grid.get(x, y);
        TileCoord {
            x: t[LANE_TILE_X] as u32,
            y: t[LANE_TILE_Y] as u32,
        }
    }

    /// Normalized height of cell `(x, y)`.
    #[inline]
    pub fn cell_height(&self, x: usize, y: usize) -> f32 {
        self.grid.get(x, y)[LANE_HEIGHT]
    }

    /// Height band of cell `(x, y)`.
    #[inline]
    pub fn band(&self, x: usize, y: usize) -> usize {
        palette_index(self.cell_height(x, y))
    }
}

/// Height band for a normalized height: `floor(h * 6)`, with `h >= 1` landing
/// in the top band and negative heights in the bottom one.
#[inline]
pub fn palette_index(height: f32) -> usize {
    let band = (height * PALETTE_SIZE as f32).floor();
    if band <= 0.0 {
        0
    } else {
        (band as usize).min(PALETTE_SIZE - 1)
    }
}

/// Bake the tile index grid for `palette` over `field`.
///
/// Output cell `(x, y)` reads height sample `(rows - 1 - y, x)`: the authored
/// height rows run opposite to the output grid's `y`.
pub fn bake_tile_index(field: &HeightField, palette: &Palette) -> Result<TileIndexGrid, SetupError> {
    let width = field.width();
    let height = field.height();
    let mut grid = Grid4::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let h = field.normalized(height - 1 - y, x);
            let tile = palette.tile(palette_index(h))?;
            grid.set(x, y, [tile.x as f32, tile.y as f32, h, 0.0]);
        }
    }

    info!(
        "baked {}x{} tile index grid (max height {:.3})",
        width,
        height,
        f32::from(field.max_sample()) / HEIGHT_SAMPLE_RANGE
    );
    Ok(TileIndexGrid { grid })
}
