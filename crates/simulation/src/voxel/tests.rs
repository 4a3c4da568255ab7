use super::*;
use crate::float_grid::Grid4;
use crate::index_bake::TileIndexGrid;

fn flat_index(width: usize, height: usize, h: f32) -> TileIndexGrid {
    TileIndexGrid {
        grid: Grid4::filled(width, height, [0.0, 0.0, h, 0.0]),
    }
}

fn params(height_multiplier: f32, y_scale: f32, clip: f32) -> VoxelParams {
    VoxelParams {
        height_multiplier,
        y_scale,
        clip_plane_height: clip,
        world_width: 8.0,
        world_depth: 8.0,
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn assert_winding_matches_normals(mesh: &MeshBuffers) {
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
        let n = cross(sub(b, a), sub(c, a));
        let expected = mesh.normals[tri[0] as usize];
        let dot = n[0] * expected[0] + n[1] * expected[1] + n[2] * expected[2];
        assert!(dot > 0.0, "triangle {tri:?} winds against its normal {expected:?}");
    }
}

// ---------------------------------------------------------------------------
// Column termination
// ---------------------------------------------------------------------------

#[test]
fn test_zero_height_column_cube_count() {
    let tops = column_tops(0.0, 1.0, 2.0);
    assert!(!tops.is_empty(), "at least one cube must be emitted");
    assert!(
        tops.len() <= 3,
        "expected at most ceil(2/1)+1 = 3 cubes, got {}",
        tops.len()
    );
    assert_eq!(tops, vec![0.0, -1.0, -2.0]);
}

#[test]
fn test_column_always_emits_first_cube() {
    // A column top already below the clip depth still gets its first cube.
    let tops = column_tops(-5.0, 1.0, 2.0);
    assert_eq!(tops, vec![-5.0]);
}

#[test]
fn test_column_count_tracks_height() {
    let tops = column_tops(4.5, 1.0, 2.0);
    // 4.5, 3.5, 2.5, 1.5, 0.5, -0.5, -1.5
    assert_eq!(tops.len(), 7);
    assert!(tops.windows(2).all(|w| w[0] > w[1]));
    assert!(*tops.last().unwrap() >= -2.0);
}

#[test]
fn test_column_with_non_positive_scale_emits_one() {
    assert_eq!(column_tops(1.0, 0.0, 2.0).len(), 1);
}

#[test]
fn test_build_cubes_covers_every_cell() {
    let index = flat_index(3, 2, 0.0);
    let cubes = build_cubes(&index, &params(8.0, 1.0, 2.0));
    assert_eq!(cubes.len(), 3 * 2 * 3);
    for y in 0..2 {
        for x in 0..3 {
            let n = cubes.iter().filter(|c| c.cell_x == x && c.cell_y == y).count();
            assert_eq!(n, 3, "cell ({x},{y}) should have 3 cubes");
        }
    }
}

// ---------------------------------------------------------------------------
// Mesh merge and clipping
// ---------------------------------------------------------------------------

#[test]
fn test_unclipped_cubes_have_six_faces() {
    let index = flat_index(1, 1, 0.0);
    let (mesh, stats) = build_voxel_mesh(&index, &params(8.0, 1.0, 2.0));
    assert_eq!(stats.cubes, 3);
    assert_eq!(stats.clipped, 0);
    assert_eq!(stats.dropped, 0);
    assert_eq!(mesh.vertex_count(), 3 * 24);
    assert_eq!(mesh.triangle_count(), 3 * 12);
    assert_eq!(mesh.normals.len(), mesh.positions.len());
    assert_eq!(mesh.uvs.len(), mesh.positions.len());
}

#[test]
fn test_geometry_above_clip_plane_is_removed() {
    // Column top 8 * 0.5 = 4 gives tops 4, 3, 2, 1, 0, -1, -2. With the clip
    // at y = 1 the first three sit wholly above it.
    let index = flat_index(1, 1, 0.5);
    let p = params(8.0, 1.0, 2.0);
    let (mesh, stats) = build_voxel_mesh(&index, &p);
    assert_eq!(stats.cubes, 7);
    assert_eq!(stats.dropped, 3, "cubes with bottom >= clip should be dropped");
    assert_eq!(stats.clipped, 0);
    let max_y = mesh.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
    assert!(max_y <= p.clip_y() + 1e-6, "max y {max_y} above clip {}", p.clip_y());
}

#[test]
fn test_straddling_cube_is_clamped_and_open() {
    // Column top 1.5 with clip at 1.0: first cube spans [0.5, 1.5].
    let index = flat_index(1, 1, 1.5 / 8.0);
    let p = params(8.0, 1.0, 2.0);
    let (mesh, stats) = build_voxel_mesh(&index, &p);
    assert_eq!(stats.clipped, 1);
    assert_eq!(stats.dropped, 0);
    let max_y = mesh.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
    assert!((max_y - 1.0).abs() < 1e-6, "clipped top should sit at 1.0, got {max_y}");
    // The clipped cube has no up-facing quad at the clip height.
    let open_top = mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .filter(|(p, n)| n[1] > 0.5 && (p[1] - 1.0).abs() < 1e-6)
        .count();
    assert_eq!(open_top, 0);
    // 4 cubes (1.5, 0.5, -0.5, -1.5), one missing its top face.
    assert_eq!(mesh.vertex_count(), 4 * 24 - 4);
}

#[test]
fn test_voxel_winding_matches_normals() {
    let index = flat_index(2, 2, 0.3);
    let (mesh, _) = build_voxel_mesh(&index, &params(8.0, 1.0, 2.0));
    assert_winding_matches_normals(&mesh);
}

#[test]
fn test_voxel_uvs_stay_in_cell_rect() {
    let index = flat_index(4, 4, 0.0);
    let (mesh, _) = build_voxel_mesh(&index, &params(8.0, 1.0, 2.0));
    for (pos, uv) in mesh.positions.iter().zip(&mesh.uvs) {
        // World x in [-4, 4] maps to u in [0, 1] for the cell's rect.
        let u_from_x = (pos[0] + 4.0) / 8.0;
        let v_from_z = (pos[2] + 4.0) / 8.0;
        assert!((u_from_x - uv[0]).abs() <= 0.25 + 1e-6);
        assert!((v_from_z - uv[1]).abs() <= 0.25 + 1e-6);
        assert!((0.0..=1.0).contains(&uv[0]) && (0.0..=1.0).contains(&uv[1]));
    }
}

#[test]
fn test_footprint_is_centered() {
    let index = flat_index(4, 4, 0.0);
    let (mesh, _) = build_voxel_mesh(&index, &params(8.0, 1.0, 2.0));
    let min_x = mesh.positions.iter().map(|p| p[0]).fold(f32::MAX, f32::min);
    let max_x = mesh.positions.iter().map(|p| p[0]).fold(f32::MIN, f32::max);
    assert!((min_x + 4.0).abs() < 1e-5 && (max_x - 4.0).abs() < 1e-5);
}

// ---------------------------------------------------------------------------
// Lid
// ---------------------------------------------------------------------------

#[test]
fn test_lid_mesh_layout() {
    let lid = build_lid_mesh(64.0, 64.0, 4);
    assert_eq!(lid.vertex_count(), 25);
    assert_eq!(lid.triangle_count(), 32);
    assert!(lid.positions.iter().all(|p| p[1] == 0.0));
    assert_eq!(lid.positions[0], [-32.0, 0.0, -32.0]);
    assert_eq!(lid.positions[24], [32.0, 0.0, 32.0]);
    assert_eq!(lid.uvs[24], [1.0, 1.0]);
    assert_winding_matches_normals(&lid);
}

#[test]
fn test_lid_mesh_zero_subdivisions_is_one_quad() {
    let lid = build_lid_mesh(2.0, 2.0, 0);
    assert_eq!(lid.vertex_count(), 4);
    assert_eq!(lid.triangle_count(), 2);
}
