use std::collections::HashMap;

use bevy::prelude::*;

use super::types::{TerrainColorMap, TileSheet};
use crate::index_bake::TileIndexGrid;
use crate::parallel::par_rows_mut;
use crate::tile_catalog::{is_water_path, TileKey, TERRAIN_CATALOG};

// ---------------------------------------------------------------------------
// Color pass
// ---------------------------------------------------------------------------

/// Color of the terrain at normalized map coordinate `(u, v)`.
///
/// The cell is `floor(uv * map_size_in_tiles)`, the offset inside it is the
/// fractional part, and the sheet is sampled at
/// `(tile + offset) * tile_size / sheet_size`.
pub fn resolve_color(index: &TileIndexGrid, sheet: &TileSheet, u: f32, v: f32) -> [u8; 4] {
    let tiles_x = index.width() as f32;
    let tiles_y = index.height() as f32;
    let cell_x = (u * tiles_x).floor();
    let cell_y = (v * tiles_y).floor();
    let offset_x = u * tiles_x - cell_x;
    let offset_y = v * tiles_y - cell_y;

    let cx = (cell_x.max(0.0) as usize).min(index.width() - 1);
    let cy = (cell_y.max(0.0) as usize).min(index.height() - 1);
    let tile = index.tile(cx, cy);

    let rel_x = sheet.tile_width as f32 / sheet.width as f32;
    let rel_y = sheet.tile_height as f32 / sheet.height as f32;
    let sheet_u = (tile.x as f32 + offset_x) * rel_x;
    let sheet_v = (tile.y as f32 + offset_y) * rel_y;
    sheet.sample_nearest(sheet_u, sheet_v)
}

/// Run the color pass over the whole map at one texel per tile texel.
pub fn render_terrain_color(index: &TileIndexGrid, sheet: &TileSheet) -> TerrainColorMap {
    let width = index.width() * sheet.tile_width;
    let height = index.height() * sheet.tile_height;
    let mut data = vec![0u8; width * height * 4];

    par_rows_mut(&mut data, width * 4, |py, row| {
        let v = (py as f32 + 0.5) / height as f32;
        for (px, out) in row.chunks_exact_mut(4).enumerate() {
            let u = (px as f32 + 0.5) / width as f32;
            out.copy_from_slice(&resolve_color(index, sheet, u, v));
        }
    });

    debug!("terrain color pass: {}x{}", width, height);
    TerrainColorMap {
        width,
        height,
        data,
    }
}

// ---------------------------------------------------------------------------
// Placeholder sheet
// ---------------------------------------------------------------------------

fn mix(col: u32, row: u32) -> u32 {
    let mut h = col.wrapping_mul(73_856_093) ^ row.wrapping_mul(19_349_663);
    h ^= h >> 13;
    h = h.wrapping_mul(0x5bd1_e995);
    h ^ (h >> 15)
}

/// Base color of a placeholder tile: blues for water tiles, earth tones for
/// ground tiles, gray for anything not in the catalog.
pub fn placeholder_tile_color(col: u32, row: u32, water: Option<bool>) -> [u8; 4] {
    let h = mix(col, row);
    let jitter = |shift: u32| ((h >> shift) & 0x1f) as u8;
    match water {
        Some(true) => [20 + jitter(0), 70 + jitter(5), 150 + jitter(10), 255],
        Some(false) => [90 + jitter(0) * 2, 80 + jitter(5) * 2, 40 + jitter(10), 255],
        None => [110 + jitter(0), 110 + jitter(0), 110 + jitter(0), 255],
    }
}

/// Deterministic stand-in for the tile sheet, used when the sheet asset cannot
/// be loaded. Each tile is a flat color with a darker one-pixel border and a
/// faint diagonal stripe.
pub fn placeholder_sheet(width: usize, height: usize, tile_width: usize, tile_height: usize) -> TileSheet {
    let classes: HashMap<(u32, u32), bool> = TERRAIN_CATALOG
        .iter()
        .filter_map(|(key, path)| {
            key.parse::<TileKey>()
                .ok()
                .map(|k| ((k.col, k.row), is_water_path(path)))
        })
        .collect();

    let mut data = vec![0u8; width * height * 4];
    par_rows_mut(&mut data, width * 4, |y, row| {
        let tile_row = (y / tile_height) as u32;
        let ly = y % tile_height;
        for (x, out) in row.chunks_exact_mut(4).enumerate() {
            let tile_col = (x / tile_width) as u32;
            let lx = x % tile_width;
            let base = placeholder_tile_color(tile_col, tile_row, classes.get(&(tile_col, tile_row)).copied());
            let border = lx == 0 || ly == 0 || lx + 1 == tile_width || ly + 1 == tile_height;
            let stripe = (lx + ly) % 8 < 2;
            let shade = |c: u8| {
                if border {
                    c / 2
                } else if stripe {
                    c.saturating_add(12)
                } else {
                    c
                }
            };
            out.copy_from_slice(&[shade(base[0]), shade(base[1]), shade(base[2]), 255]);
        }
    });

    TileSheet {
        width,
        height,
        tile_width,
        tile_height,
        data,
    }
}

// ---------------------------------------------------------------------------
// Pixel comparison
// ---------------------------------------------------------------------------

/// Per-channel tolerance when comparing normalized pixels.
pub const PIXEL_TOLERANCE: f32 = 1.0 / 255.0;

/// An expected pixel whose red channel is this value is not checked.
pub const PIXEL_SKIP_SENTINEL: f32 = -1.0;

/// Whether `actual` equals `expected` within one 8-bit step on every channel.
pub fn pixels_match(expected: [f32; 4], actual: [f32; 4]) -> bool {
    if expected[0] == PIXEL_SKIP_SENTINEL {
        return true;
    }
    expected
        .iter()
        .zip(actual.iter())
        .all(|(e, a)| (e - a).abs() <= PIXEL_TOLERANCE)
}
