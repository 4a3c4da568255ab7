//! Terrain on screen: GPU images for the baked grids, the voxel mesh with the
//! terrain color map as its material, and the tile sheet that feeds the color
//! pass.
//!
//! The sheet is an asset and arrives some frames after startup. Until then the
//! voxel mesh shows a flat placeholder color; once the sheet loads (or fails
//! to, in which case a procedural sheet stands in) the color pass runs on the
//! CPU and the result replaces the placeholder.

mod images;
mod systems;

pub use images::{
    blank_terrain_color_image, image_for_target, mesh_from_buffers, sampler_for, terrain_color_image,
    texture_format, tile_sheet_from_image,
};
pub use systems::{load_tile_sheet, resolve_tile_sheet, spawn_terrain, TerrainImages, TerrainMesh, TileSheetHandle};
