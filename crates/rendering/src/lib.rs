use bevy::prelude::*;

pub mod camera;
pub mod device_caps;
pub mod display;
pub mod scene_render;
pub mod water_render;

use display::DisplaySize;
use simulation::{FrameSet, StartupSet};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisplaySize>()
            .add_systems(
                Startup,
                device_caps::detect_device_capabilities.in_set(StartupSet::Detect),
            )
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    camera::setup_lighting,
                    scene_render::load_tile_sheet,
                    scene_render::spawn_terrain,
                    water_render::spawn_water_lid,
                )
                    .chain()
                    .in_set(StartupSet::Spawn),
            )
            .add_systems(
                Update,
                (scene_render::resolve_tile_sheet, water_render::upload_water)
                    .chain()
                    .in_set(FrameSet::Upload),
            )
            .add_systems(Update, display::poll_resize.in_set(FrameSet::Display));
    }
}
