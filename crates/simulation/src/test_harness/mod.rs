//! # TestScene: headless harness for the terrain and water pipeline
//!
//! Wraps `bevy::app::App` + `MinimalPlugins` + `SimulationPlugin` so tests can
//! run startup and whole frames without a window or a GPU. Frame time is
//! driven manually, so the number of water ticks per frame is deterministic.

mod assertions;
mod queries;

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::{SHEET_TILES_X, SHEET_TILES_Y};
use crate::height_field::HeightField;
use crate::index_bake::TileIndexGrid;
use crate::settings::TidewaterConfig;
use crate::terrain_color::{placeholder_sheet, render_terrain_color};
use crate::SimulationPlugin;

/// Frame length used unless a test picks another: 0.05 s is 0.5 simulated
/// units at the default time scale, so every frame owes at least one tick.
pub const DEFAULT_FRAME_SECONDS: f32 = 0.05;

/// Tile edge of the placeholder sheet the harness renders with. Kept small so
/// the color pass stays cheap.
const HARNESS_TILE_SIZE: usize = 4;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestScene {
    app: App,
}

impl TestScene {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default terrain with a 32x32 water grid and a coarse lid.
    pub fn new() -> Self {
        Self::with_config(Self::small_config())
    }

    /// Config used by `new()`: defaults everywhere except sizes.
    pub fn small_config() -> TidewaterConfig {
        let mut config = TidewaterConfig::default();
        config.water.grid_size = 32;
        config.terrain.lid_subdivisions = 8;
        config
    }

    pub fn with_config(config: TidewaterConfig) -> Self {
        Self::build(config, None)
    }

    /// Like `with_config`, with a custom height field instead of the built-in
    /// map.
    pub fn with_height_field(config: TidewaterConfig, field: HeightField) -> Self {
        Self::build(config, Some(field))
    }

    fn build(config: TidewaterConfig, field: Option<HeightField>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            DEFAULT_FRAME_SECONDS,
        )));
        app.insert_resource(config);
        if let Some(field) = field {
            app.insert_resource(field);
        }
        app.add_plugins(SimulationPlugin);

        // Runs Startup. Bevy's first time update has zero delta, so no water
        // tick happens here.
        app.update();
        Self { app }
    }

    /// Render the terrain color map from a procedural sheet and insert it,
    /// the way the renderer does once the sheet is available.
    pub fn with_placeholder_terrain(mut self) -> Self {
        let Some(index) = self.app.world().get_resource::<TileIndexGrid>().cloned() else {
            return self;
        };
        let sheet = placeholder_sheet(
            SHEET_TILES_X * HARNESS_TILE_SIZE,
            SHEET_TILES_Y * HARNESS_TILE_SIZE,
            HARNESS_TILE_SIZE,
            HARNESS_TILE_SIZE,
        );
        let map = render_terrain_color(&index, &sheet);
        self.app.world_mut().insert_resource(map);
        self
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Change the length of subsequent frames.
    pub fn set_frame_seconds(&mut self, seconds: f32) {
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(seconds)));
    }

    /// Run `n` full frames (`Update` and everything around it).
    pub fn frames(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Access the ECS world directly.
    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

impl Default for TestScene {
    fn default() -> Self {
        Self::new()
    }
}
