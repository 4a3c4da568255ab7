use bevy::prelude::*;

pub mod config;
pub mod error;
pub mod float_grid;
pub mod frame;
pub mod height_field;
pub mod index_bake;
pub mod palette;
pub mod parallel;
pub mod settings;
pub mod sim_rng;
pub mod simulation_sets;
pub mod targets;
pub mod terrain_color;
pub mod tile_catalog;
pub mod voxel;
pub mod water;
pub mod world_init;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::{FrameSet, StartupSet};

use frame::{FrameClock, FrameCounter};
use height_field::HeightField;
use settings::TidewaterConfig;
use targets::DeviceCapabilities;

/// Terrain bake, voxel geometry and the water engine. Headless: the
/// rendering crate turns the resources built here into images and meshes.
///
/// A `TidewaterConfig`, `HeightField` or `DeviceCapabilities` inserted before
/// the first update replaces the default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        simulation_sets::configure_sets(app);

        app.init_resource::<TidewaterConfig>()
            .init_resource::<HeightField>()
            .init_resource::<DeviceCapabilities>()
            .init_resource::<FrameCounter>()
            .init_resource::<FrameClock>()
            .add_systems(Startup, world_init::init_world.in_set(StartupSet::Build))
            .add_systems(Update, frame::update_frame_clock.in_set(FrameSet::Clock));

        app.add_plugins(water::WaterPlugin);
    }
}
