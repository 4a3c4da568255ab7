use bevy::prelude::*;

use crate::index_bake::TileIndexGrid;

use super::extrusion::build_cubes;
use super::types::{MeshBuffers, VoxelParams, VoxelStats};

/// Merge every cube of the terrain into one mesh, cut at `params.clip_y()`.
///
/// Cubes entirely above the clip height are dropped. Cubes crossing it are
/// shortened to end at the clip height and lose their top face, leaving the
/// stack open above the waterline. Every face of a cube samples its cell's
/// rectangle of the terrain color map.
pub fn build_voxel_mesh(index: &TileIndexGrid, params: &VoxelParams) -> (MeshBuffers, VoxelStats) {
    let cubes = build_cubes(index, params);
    let clip_y = params.clip_y();
    let cell_w = params.world_width / index.width() as f32;
    let cell_d = params.world_depth / index.height() as f32;
    let inv_w = 1.0 / index.width() as f32;
    let inv_h = 1.0 / index.height() as f32;

    let mut buffers = MeshBuffers::default();
    let mut stats = VoxelStats {
        cubes: cubes.len(),
        ..default()
    };

    for cube in &cubes {
        let bottom = cube.top - params.y_scale;
        if bottom >= clip_y {
            stats.dropped += 1;
            continue;
        }
        let clipped = cube.top > clip_y;
        if clipped {
            stats.clipped += 1;
        }
        let top = cube.top.min(clip_y);

        let x0 = cube.cell_x as f32 * cell_w - params.world_width * 0.5;
        let z0 = cube.cell_y as f32 * cell_d - params.world_depth * 0.5;
        let (x1, z1) = (x0 + cell_w, z0 + cell_d);
        let (y0, y1) = (bottom, top);

        let u0 = cube.cell_x as f32 * inv_w;
        let v0 = cube.cell_y as f32 * inv_h;
        let (u1, v1) = (u0 + inv_w, v0 + inv_h);
        let uvs = [[u0, v0], [u0, v1], [u1, v1], [u1, v0]];

        if !clipped {
            buffers.push_quad(
                [[x0, y1, z0], [x0, y1, z1], [x1, y1, z1], [x1, y1, z0]],
                [0.0, 1.0, 0.0],
                uvs,
            );
        }
        buffers.push_quad(
            [[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]],
            [0.0, -1.0, 0.0],
            uvs,
        );
        buffers.push_quad(
            [[x1, y0, z0], [x1, y1, z0], [x1, y1, z1], [x1, y0, z1]],
            [1.0, 0.0, 0.0],
            uvs,
        );
        buffers.push_quad(
            [[x0, y0, z0], [x0, y0, z1], [x0, y1, z1], [x0, y1, z0]],
            [-1.0, 0.0, 0.0],
            uvs,
        );
        buffers.push_quad(
            [[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]],
            [0.0, 0.0, 1.0],
            uvs,
        );
        buffers.push_quad(
            [[x0, y0, z0], [x0, y1, z0], [x1, y1, z0], [x1, y0, z0]],
            [0.0, 0.0, -1.0],
            uvs,
        );
    }

    stats.vertices = buffers.vertex_count();
    info!(
        "voxel mesh: {} cubes ({} clipped, {} dropped), {} vertices",
        stats.cubes, stats.clipped, stats.dropped, stats.vertices
    );
    (buffers, stats)
}

/// Flat `subdivisions x subdivisions` grid at y = 0 covering the map
/// footprint, UVs running 0..1 across it in the same orientation as the
/// terrain color map.
pub fn build_lid_mesh(world_width: f32, world_depth: f32, subdivisions: u32) -> MeshBuffers {
    let n = subdivisions.max(1);
    let stride = n + 1;
    let mut buffers = MeshBuffers::default();

    for j in 0..=n {
        let v = j as f32 / n as f32;
        for i in 0..=n {
            let u = i as f32 / n as f32;
            buffers.positions.push([
                u * world_width - world_width * 0.5,
                0.0,
                v * world_depth - world_depth * 0.5,
            ]);
            buffers.normals.push([0.0, 1.0, 0.0]);
            buffers.uvs.push([u, v]);
        }
    }

    for j in 0..n {
        for i in 0..n {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            buffers.indices.extend_from_slice(&[a, c, d, a, d, b]);
        }
    }
    buffers
}
