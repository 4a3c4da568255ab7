use crate::index_bake::TileIndexGrid;

use super::types::{CubeInstance, VoxelParams};

/// Top heights of the cubes in one column, from the column top downward.
///
/// The first cube is always emitted; later ones follow every `y_scale` while
/// their top stays at or above `-clip_plane_height`.
pub fn column_tops(column_top: f32, y_scale: f32, clip_plane_height: f32) -> Vec<f32> {
    let floor = -clip_plane_height;
    let mut tops = vec![column_top];
    if y_scale <= 0.0 {
        return tops;
    }
    let mut top = column_top - y_scale;
    while top >= floor {
        tops.push(top);
        top -= y_scale;
    }
    tops
}

/// Cube instances for every cell of the index grid, row by row.
pub fn build_cubes(index: &TileIndexGrid, params: &VoxelParams) -> Vec<CubeInstance> {
    let mut cubes = Vec::new();
    for y in 0..index.height() {
        for x in 0..index.width() {
            let column_top = params.height_multiplier * index.cell_height(x, y);
            cubes.extend(
                column_tops(column_top, params.y_scale, params.clip_plane_height)
                    .into_iter()
                    .map(|top| CubeInstance {
                        cell_x: x,
                        cell_y: y,
                        top,
                    }),
            );
        }
    }
    cubes
}
