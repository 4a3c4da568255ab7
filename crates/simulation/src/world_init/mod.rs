// =============================================================================
// Startup: palette selection, tile index bake, voxel extrusion and water
// allocation. Everything here runs once; a failure stops the app.
// =============================================================================

use bevy::prelude::*;

use crate::config::{MAP_HEIGHT_IN_3D_UNITS, MAP_WIDTH_IN_3D_UNITS};
use crate::error::SetupError;
use crate::height_field::HeightField;
use crate::index_bake::{bake_tile_index, TileIndexGrid};
use crate::palette::{resolve_palette, Palette};
use crate::settings::TidewaterConfig;
use crate::sim_rng::SessionRng;
use crate::targets::{check_pipeline, DeviceCapabilities};
use crate::voxel::{build_lid_mesh, build_voxel_mesh, MeshBuffers, VoxelParams, VoxelStats};
use crate::water::{WaterParams, WaterSimulationState};

/// CPU geometry built at startup, handed to the renderer to spawn.
#[derive(Resource, Debug, Clone, Default)]
pub struct TerrainGeometry {
    pub voxels: MeshBuffers,
    pub stats: VoxelStats,
    pub lid: MeshBuffers,
}

/// Present when startup failed; holds the message that was logged.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SetupFailed(pub String);

/// Everything `init_world` inserts, built without touching the ECS.
pub struct WorldSetup {
    pub rng: SessionRng,
    pub palette: Palette,
    pub index: TileIndexGrid,
    pub voxel_params: VoxelParams,
    pub geometry: TerrainGeometry,
    pub water_params: WaterParams,
    pub water: WaterSimulationState,
}

/// Run the setup chain: validate config, check device capabilities, resolve
/// the palette, bake, extrude, allocate water.
pub fn build_world(
    config: &TidewaterConfig,
    caps: &DeviceCapabilities,
    field: &HeightField,
) -> Result<WorldSetup, SetupError> {
    config.validate()?;
    check_pipeline(config.water.grid_size, caps)?;

    let mut rng = SessionRng::from_seed_str(&config.terrain.seed);
    let palette = resolve_palette(&config.terrain.selection, &mut rng.0)?;
    let index = bake_tile_index(field, &palette)?;
    index
        .grid
        .expect_dims("tile_index", (field.width(), field.height()))?;

    let voxel_params = VoxelParams::from_settings(&config.terrain);
    let (voxels, stats) = build_voxel_mesh(&index, &voxel_params);
    let lid = build_lid_mesh(
        MAP_WIDTH_IN_3D_UNITS,
        MAP_HEIGHT_IN_3D_UNITS,
        config.terrain.lid_subdivisions,
    );

    let water = WaterSimulationState::new(config.water.grid_size);
    water.check_dims()?;
    info!(
        "water grid {}x{} allocated ({} KiB per slot)",
        water.size,
        water.size,
        water.size * water.size * 16 / 1024
    );

    Ok(WorldSetup {
        rng,
        palette,
        index,
        voxel_params,
        geometry: TerrainGeometry { voxels, stats, lid },
        water_params: WaterParams::from_settings(&config.water),
        water,
    })
}

pub fn init_world(
    mut commands: Commands,
    config: Res<TidewaterConfig>,
    caps: Res<DeviceCapabilities>,
    field: Res<HeightField>,
    mut exit: EventWriter<AppExit>,
) {
    match build_world(&config, &caps, &field) {
        Ok(setup) => {
            commands.insert_resource(setup.rng);
            commands.insert_resource(setup.palette);
            commands.insert_resource(setup.index);
            commands.insert_resource(setup.voxel_params);
            commands.insert_resource(setup.geometry);
            commands.insert_resource(setup.water_params);
            commands.insert_resource(setup.water);
        }
        Err(e) => {
            error!("setup failed: {e}");
            commands.insert_resource(SetupFailed(e.to_string()));
            exit.send(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteSelection;

    fn small_config() -> TidewaterConfig {
        let mut config = TidewaterConfig::default();
        config.water.grid_size = 16;
        config.terrain.lid_subdivisions = 4;
        config
    }

    #[test]
    fn test_build_world_with_defaults() {
        let setup = build_world(
            &small_config(),
            &DeviceCapabilities::default(),
            &HeightField::default(),
        )
        .unwrap();
        assert_eq!(setup.index.width(), 32);
        assert_eq!(setup.water.size, 16);
        assert!(setup.geometry.stats.cubes >= 32 * 32);
        assert_eq!(setup.geometry.lid.vertex_count(), 25);
    }

    #[test]
    fn test_missing_float_textures_fail_setup() {
        let caps = DeviceCapabilities {
            float_textures: false,
            float_linear_filtering: false,
        };
        let result = build_world(&small_config(), &caps, &HeightField::default());
        assert!(matches!(result, Err(SetupError::UnsupportedTargetFormat(_))));
    }

    #[test]
    fn test_bad_terrain_set_fails_setup() {
        let mut config = small_config();
        config.terrain.selection = PaletteSelection::Keys {
            keys: vec!["5X23".to_string(); 5],
        };
        let result = build_world(&config, &DeviceCapabilities::default(), &HeightField::default());
        assert!(
            matches!(result, Err(SetupError::TerrainSetLength { expected: 6, found: 5 })),
            "five keys should be rejected, got {:?}",
            result.err()
        );
    }

    #[test]
    fn test_same_seed_same_random_palette() {
        let mut config = small_config();
        config.terrain.selection = PaletteSelection::Random;
        let caps = DeviceCapabilities::default();
        let field = HeightField::default();
        let a = build_world(&config, &caps, &field).unwrap();
        let b = build_world(&config, &caps, &field).unwrap();
        assert_eq!(a.palette, b.palette);
        assert_eq!(a.index, b.index);
    }
}
