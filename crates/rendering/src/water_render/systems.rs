use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;

use simulation::targets::TargetDescriptor;
use simulation::water::{WaterFrameReport, WaterParams, WaterSimulationState};
use simulation::world_init::TerrainGeometry;

use super::upload::{color_bytes, displace_lid};
use crate::scene_render::{image_for_target, mesh_from_buffers};

/// The lit water color on the GPU, bound by the lid material.
#[derive(Resource, Debug, Clone)]
pub struct WaterImages {
    pub color: Handle<Image>,
}

#[derive(Component)]
pub struct WaterLid {
    /// UVs of the lid vertices, kept to resample heights every frame.
    pub uvs: Vec<[f32; 2]>,
}

pub fn spawn_water_lid(
    mut commands: Commands,
    geometry: Option<Res<TerrainGeometry>>,
    water: Option<Res<WaterSimulationState>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let (Some(geometry), Some(water)) = (geometry, water) else {
        return;
    };
    let size = water.size;
    let color_desc = TargetDescriptor::water_color(size);
    let Some(color) = image_for_target(&color_desc, vec![0; color_desc.byte_len()]) else {
        error!("water color image could not be created");
        return;
    };

    let color = images.add(color);
    commands.insert_resource(WaterImages { color: color.clone() });

    let material = materials.add(StandardMaterial {
        base_color_texture: Some(color),
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(mesh_from_buffers(&geometry.lid))),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        WaterLid {
            uvs: geometry.lid.uvs.clone(),
        },
    ));
    info!(
        "water lid: {} vertices over a {}x{} grid",
        geometry.lid.vertex_count(),
        size,
        size
    );
}

/// Copy the derived grids into their images and displace the lid. Only runs
/// on frames where the engine refreshed them.
pub fn upload_water(
    report: Res<WaterFrameReport>,
    params: Res<WaterParams>,
    water: Option<Res<WaterSimulationState>>,
    water_images: Option<Res<WaterImages>>,
    lids: Query<(&Mesh3d, &WaterLid)>,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !report.last.derived {
        return;
    }
    let (Some(water), Some(water_images)) = (water, water_images) else {
        return;
    };

    if let Some(image) = images.get_mut(&water_images.color) {
        color_bytes(&water.color, &mut image.data);
    }

    for (mesh3d, lid) in &lids {
        let Some(mesh) = meshes.get_mut(&mesh3d.0) else {
            continue;
        };
        if let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
        {
            displace_lid(
                positions,
                &lid.uvs,
                &water.smoothed,
                params.shade.displacement_scale,
            );
        }
    }
}
