use bevy::prelude::*;

use crate::config::{TILE_HEIGHT, TILE_WIDTH};
use crate::error::SetupError;

/// CPU copy of the master tile sheet, RGBA8 row-major, row 0 at the top.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileSheet {
    pub width: usize,
    pub height: usize,
    pub tile_width: usize,
    pub tile_height: usize,
    pub data: Vec<u8>,
}

impl TileSheet {
    pub fn from_rgba8(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SetupError> {
        if data.len() != width * height * 4 {
            return Err(SetupError::GridMismatch {
                what: "tile sheet pixels",
                expected: (width, height),
                found: (data.len() / 4, 1),
            });
        }
        Ok(Self {
            width,
            height,
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            data,
        })
    }

    pub fn with_tile_size(mut self, tile_width: usize, tile_height: usize) -> Self {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Nearest texel for a normalized coordinate, clamped to the edge.
    #[inline]
    pub fn sample_nearest(&self, u: f32, v: f32) -> [u8; 4] {
        let x = ((u * self.width as f32).floor().max(0.0) as usize).min(self.width - 1);
        let y = ((v * self.height as f32).floor().max(0.0) as usize).min(self.height - 1);
        self.texel(x, y)
    }
}

/// Output of the color pass: one texel per tile texel of the whole map.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TerrainColorMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl TerrainColorMap {
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Bilinear RGB sample in `[0, 1]`, clamped addressing, texel centers at
    /// `(i + 0.5) / n`.
    pub fn sample_rgb(&self, u: f32, v: f32) -> [f32; 3] {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let fx = (u * self.width as f32 - 0.5).clamp(0.0, max_x);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, max_y);
        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let (a, b, c, d) = (
            self.texel(x0, y0),
            self.texel(x1, y0),
            self.texel(x0, y1),
            self.texel(x1, y1),
        );
        let mut out = [0.0; 3];
        for (i, lane) in out.iter_mut().enumerate() {
            let top = f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * tx;
            let bottom = f32::from(c[i]) + (f32::from(d[i]) - f32::from(c[i])) * tx;
            *lane = (top + (bottom - top) * ty) / 255.0;
        }
        out
    }
}
