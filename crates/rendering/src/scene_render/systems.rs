use bevy::asset::LoadState;
use bevy::prelude::*;

use simulation::config::{SHEET_HEIGHT, SHEET_WIDTH, TILE_HEIGHT, TILE_WIDTH};
use simulation::index_bake::TileIndexGrid;
use simulation::settings::TidewaterConfig;
use simulation::terrain_color::{placeholder_sheet, render_terrain_color, TerrainColorMap, TileSheet};
use simulation::world_init::TerrainGeometry;

use super::images::{
    blank_terrain_color_image, mesh_from_buffers, terrain_color_image, tile_sheet_from_image,
};

/// The terrain color map on the GPU, bound by the voxel material.
#[derive(Resource, Debug, Clone)]
pub struct TerrainImages {
    pub color: Handle<Image>,
}

/// The master tile sheet while it loads.
#[derive(Resource, Debug, Clone)]
pub struct TileSheetHandle(pub Handle<Image>);

#[derive(Component)]
pub struct TerrainMesh;

pub fn load_tile_sheet(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<TidewaterConfig>) {
    let handle = asset_server.load(config.terrain.sheet_path.clone());
    info!("loading tile sheet {}", config.terrain.sheet_path);
    commands.insert_resource(TileSheetHandle(handle));
}

/// Spawn the voxel terrain. Skips quietly if startup failed; the app is
/// already on its way out then.
pub fn spawn_terrain(
    mut commands: Commands,
    geometry: Option<Res<TerrainGeometry>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(geometry) = geometry else {
        return;
    };
    let Some(color_image) = blank_terrain_color_image() else {
        error!("terrain color image could not be created");
        return;
    };

    let color = images.add(color_image);
    commands.insert_resource(TerrainImages { color: color.clone() });

    let material = materials.add(StandardMaterial {
        base_color_texture: Some(color),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(mesh_from_buffers(&geometry.voxels))),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        TerrainMesh,
    ));

    let stats = geometry.stats;
    info!(
        "terrain mesh: {} cubes ({} clipped, {} dropped), {} vertices",
        stats.cubes, stats.clipped, stats.dropped, stats.vertices
    );
}

/// Once the sheet has loaded or failed, run the color pass and swap the
/// result into the terrain image. Does nothing after the first success.
pub fn resolve_tile_sheet(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    sheet: Option<Res<TileSheetHandle>>,
    index: Option<Res<TileIndexGrid>>,
    terrain_images: Option<Res<TerrainImages>>,
    existing: Option<Res<TerrainColorMap>>,
    mut images: ResMut<Assets<Image>>,
) {
    if existing.is_some() {
        return;
    }
    let (Some(sheet), Some(index), Some(terrain_images)) = (sheet, index, terrain_images) else {
        return;
    };

    let tiles: TileSheet = match asset_server.get_load_state(sheet.0.id()) {
        Some(LoadState::Loaded) => match images.get(&sheet.0).and_then(tile_sheet_from_image) {
            Some(tiles) => tiles.with_tile_size(TILE_WIDTH, TILE_HEIGHT),
            None => {
                warn!("tile sheet has an unusable format; using placeholder tiles");
                placeholder_sheet(SHEET_WIDTH, SHEET_HEIGHT, TILE_WIDTH, TILE_HEIGHT)
            }
        },
        Some(LoadState::Failed(e)) => {
            warn!("tile sheet failed to load ({e}); using placeholder tiles");
            placeholder_sheet(SHEET_WIDTH, SHEET_HEIGHT, TILE_WIDTH, TILE_HEIGHT)
        }
        _ => return,
    };

    let map = render_terrain_color(&index, &tiles);
    info!("terrain color map {}x{} rendered", map.width, map.height);
    match terrain_color_image(&map) {
        Some(image) => {
            if let Some(target) = images.get_mut(&terrain_images.color) {
                *target = image;
            }
        }
        None => warn!("terrain color map did not match its target; keeping placeholder"),
    }
    commands.insert_resource(map);
    commands.remove_resource::<TileSheetHandle>();
}
