//! Flat terrain color pass.
//!
//! Resolves every texel of the terrain color map by looking up its map cell in
//! the tile index grid and copying the matching texel of that cell's tile from
//! the master sheet. The result is the base color of the voxel mesh and the
//! background seen through the water.

mod calculations;
#[cfg(test)]
mod tests;
mod types;

pub use calculations::{
    pixels_match, placeholder_sheet, placeholder_tile_color, render_terrain_color, resolve_color,
    PIXEL_SKIP_SENTINEL, PIXEL_TOLERANCE,
};
pub use types::{TerrainColorMap, TileSheet};
