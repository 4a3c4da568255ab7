//! Runtime configuration.
//!
//! Everything tunable lives in `TidewaterConfig`, read once at startup from an
//! optional JSON file. Missing fields take their defaults, so a file only has
//! to name what it changes.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{SESSION_SEED, SIM_TIMESTEP, SIM_TIME_SCALE, WATER_GRID_SIZE};
use crate::error::SetupError;
use crate::palette::PaletteSelection;

/// Env var naming a JSON config file.
pub const CONFIG_PATH_ENV: &str = "TIDEWATER_CONFIG";
/// Env var overriding the preset name.
pub const TERRAIN_SET_ENV: &str = "TIDEWATER_TERRAIN_SET";
/// Env var switching to random palette selection when set to `1`/`true`.
pub const RANDOM_TERRAIN_ENV: &str = "TIDEWATER_RANDOM_TERRAIN";

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub selection: PaletteSelection,
    /// Seed string for random palette draws.
    pub seed: String,
    /// World height of a column whose normalized height is 1.
    pub height_multiplier: f32,
    /// Height of one cube in world units.
    pub y_scale: f32,
    /// Columns extend down to `-clip_plane_height`.
    pub clip_plane_height: f32,
    /// Quads per side of the water lid mesh.
    pub lid_subdivisions: u32,
    /// Asset path of the master tile sheet.
    pub sheet_path: String,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            selection: PaletteSelection::default(),
            seed: SESSION_SEED.to_string(),
            height_multiplier: 8.0,
            y_scale: 1.0,
            clip_plane_height: 2.0,
            lid_subdivisions: 128,
            sheet_path: "textures/tile_sheet.png".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Water
// ---------------------------------------------------------------------------

/// One directional wave component of the seed function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveTrain {
    /// Travel direction on the grid plane; normalized on use.
    pub direction: [f32; 2],
    pub amplitude: f32,
    /// Wavelength as a fraction of the grid side.
    pub wavelength: f32,
    /// Phase speed in grid-side fractions per simulated time unit.
    pub speed: f32,
    /// Crest sharpness in `[0, 1]`; 0 is a plain sine.
    pub steepness: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    /// Texels per side of the simulation grid.
    pub grid_size: usize,
    /// Simulated time per tick.
    pub timestep: f32,
    /// Simulated time per wall-clock second.
    pub time_scale: f32,
    /// Fraction of a height difference pushed to a lower neighbor per tick.
    pub flow_rate: f32,
    /// Weight of the current velocity in the new transfer.
    pub inertia: f32,
    /// Weight of the previous tick's transfer in the new transfer.
    pub transfer_memory: f32,
    /// Upper bound on total outflow from one cell per tick.
    pub max_outflow: f32,
    /// Multiplier applied to displacement after each tick. 1 disables decay;
    /// the flow model still evens the surface out over many ticks.
    pub decay: f32,
    pub wave_trains: Vec<WaveTrain>,
    /// Amplitude of the simplex noise term added at seed time. 0 disables it.
    pub seed_noise_amplitude: f32,
    pub seed_noise_frequency: f32,
    pub seed_noise_seed: i32,
    /// World-space scale applied to displacement on the lid mesh.
    pub displacement_scale: f32,
    /// Depth below the surface where refracted rays meet the terrain.
    pub refraction_depth: f32,
    pub light_direction: [f32; 3],
    /// RGB tint of the water body.
    pub tint: [f32; 3],
    /// Blend factor between refracted ground color and tint.
    pub tint_strength: f32,
    /// Run every owed tick each frame instead of at most one.
    pub catch_up: bool,
    /// Upper bound on ticks per frame when `catch_up` is on.
    pub max_ticks_per_frame: u32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            grid_size: WATER_GRID_SIZE,
            timestep: SIM_TIMESTEP,
            time_scale: SIM_TIME_SCALE,
            flow_rate: 0.2,
            inertia: 0.6,
            transfer_memory: 0.3,
            max_outflow: 0.5,
            decay: 1.0,
            wave_trains: default_wave_trains(),
            seed_noise_amplitude: 0.02,
            seed_noise_frequency: 0.02,
            seed_noise_seed: 1337,
            displacement_scale: 1.0,
            refraction_depth: 2.0,
            light_direction: [-0.65, 1.0, -0.65],
            tint: [0.05, 0.28, 0.42],
            tint_strength: 0.35,
            catch_up: false,
            max_ticks_per_frame: 4,
        }
    }
}

/// Four trains: each later one is smaller, shorter and faster.
pub fn default_wave_trains() -> Vec<WaveTrain> {
    vec![
        WaveTrain {
            direction: [1.0, 0.3],
            amplitude: 0.12,
            wavelength: 0.25,
            speed: 0.01,
            steepness: 0.5,
        },
        WaveTrain {
            direction: [0.4, 1.0],
            amplitude: 0.06,
            wavelength: 0.125,
            speed: 0.014,
            steepness: 0.4,
        },
        WaveTrain {
            direction: [-0.7, 0.6],
            amplitude: 0.03,
            wavelength: 0.0625,
            speed: 0.02,
            steepness: 0.3,
        },
        WaveTrain {
            direction: [0.2, -1.0],
            amplitude: 0.015,
            wavelength: 0.03125,
            speed: 0.028,
            steepness: 0.2,
        },
    ]
}

// ---------------------------------------------------------------------------
// TidewaterConfig
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TidewaterConfig {
    pub terrain: TerrainSettings,
    pub water: WaterSettings,
}

impl TidewaterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SetupError> {
        let config: TidewaterConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, SetupError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the session config from the environment. A missing or broken
    /// config file is logged and replaced by defaults; overrides are applied
    /// either way.
    pub fn from_env() -> Self {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => match Self::load_from_path(Path::new(&path)) {
                Ok(config) => {
                    info!("loaded config from {path}");
                    config
                }
                Err(e) => {
                    warn!("ignoring config file {path}: {e}; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        config.apply_overrides(
            std::env::var(TERRAIN_SET_ENV).ok().as_deref(),
            std::env::var(RANDOM_TERRAIN_ENV).ok().as_deref(),
        );
        config
    }

    /// Apply env-style overrides. Random mode wins over a preset name.
    pub fn apply_overrides(&mut self, terrain_set: Option<&str>, random: Option<&str>) {
        if let Some(name) = terrain_set.filter(|n| !n.is_empty()) {
            self.terrain.selection = PaletteSelection::Preset {
                name: name.to_string(),
            };
        }
        if matches!(random, Some("1") | Some("true") | Some("yes")) {
            self.terrain.selection = PaletteSelection::Random;
        }
    }

    /// Check preconditions that would otherwise surface as broken grids or
    /// meshes later on.
    pub fn validate(&self) -> Result<(), SetupError> {
        let t = &self.terrain;
        let w = &self.water;
        let invalid = |msg: String| Err(SetupError::InvalidConfig(msg));

        if !(t.y_scale.is_finite() && t.y_scale > 0.0) {
            return invalid(format!("terrain.y_scale must be positive, got {}", t.y_scale));
        }
        if !(t.clip_plane_height.is_finite() && t.clip_plane_height >= 0.0) {
            return invalid(format!(
                "terrain.clip_plane_height must be >= 0, got {}",
                t.clip_plane_height
            ));
        }
        if !t.height_multiplier.is_finite() {
            return invalid("terrain.height_multiplier must be finite".to_string());
        }
        if t.lid_subdivisions == 0 {
            return invalid("terrain.lid_subdivisions must be non-zero".to_string());
        }
        if w.grid_size < 3 {
            return invalid(format!("water.grid_size must be at least 3, got {}", w.grid_size));
        }
        if !(w.timestep.is_finite() && w.timestep > 0.0) {
            return invalid(format!("water.timestep must be positive, got {}", w.timestep));
        }
        if !(w.time_scale.is_finite() && w.time_scale >= 0.0) {
            return invalid(format!("water.time_scale must be >= 0, got {}", w.time_scale));
        }
        if !(w.max_outflow.is_finite() && w.max_outflow > 0.0) {
            return invalid(format!("water.max_outflow must be positive, got {}", w.max_outflow));
        }
        if !(w.decay > 0.0 && w.decay <= 1.0) {
            return invalid(format!("water.decay must be in (0, 1], got {}", w.decay));
        }
        if w.light_direction.iter().all(|c| *c == 0.0) {
            return invalid("water.light_direction must be non-zero".to_string());
        }
        if w.catch_up && w.max_ticks_per_frame == 0 {
            return invalid("water.max_ticks_per_frame must be non-zero with catch_up".to_string());
        }
        Ok(())
    }
}
