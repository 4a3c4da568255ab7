/// Size of one tile on the master tile sheet, in pixels.
pub const TILE_WIDTH: usize = 32;
pub const TILE_HEIGHT: usize = 32;

/// Terrain map size in tiles. The height field is authored at this size.
pub const MAP_WIDTH_IN_TILES: usize = 32;
pub const MAP_HEIGHT_IN_TILES: usize = 32;

/// Terrain color map size in pixels (one tile image per map cell).
pub const MAP_WIDTH_IN_PIXELS: usize = TILE_WIDTH * MAP_WIDTH_IN_TILES;
pub const MAP_HEIGHT_IN_PIXELS: usize = TILE_HEIGHT * MAP_HEIGHT_IN_TILES;

/// World-space footprint of the whole terrain on the XZ plane.
pub const MAP_WIDTH_IN_3D_UNITS: f32 = 64.0;
pub const MAP_HEIGHT_IN_3D_UNITS: f32 = 64.0;

/// Master tile sheet dimensions in pixels.
pub const SHEET_WIDTH: usize = 4096;
pub const SHEET_HEIGHT: usize = 4096;

/// Number of tile columns/rows actually populated on the master sheet.
pub const SHEET_TILES_X: usize = 64;
pub const SHEET_TILES_Y: usize = 95;

/// Number of height bands in a terrain set.
pub const PALETTE_SIZE: usize = 6;

/// Height samples are bytes; normalized height = sample / HEIGHT_SAMPLE_RANGE.
pub const HEIGHT_SAMPLE_RANGE: f32 = 256.0;

/// Default resolution of the water simulation grid (texels per axis).
pub const WATER_GRID_SIZE: usize = 1024;

/// Fixed simulation step, in simulated-time units.
pub const SIM_TIMESTEP: f32 = 0.4;

/// Simulated-time units per wall-clock second.
pub const SIM_TIME_SCALE: f32 = 10.0;

/// Relative index of refraction used for the water surface (air -> water).
pub const WATER_ETA: f32 = 1.0 / 1.333;

/// Default seed string for the session PRNG.
pub const SESSION_SEED: &str = "hello.";

/// Number of floats per texel in every simulation/index grid (RGBA).
pub const FLOAT_SIZE: usize = 4;
