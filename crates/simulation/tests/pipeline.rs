//! End-to-end checks of the headless pipeline through the public API:
//! palette -> bake -> {color pass, voxel mesh, water engine}.
//!
//! Run: cargo test -p simulation --test pipeline

use simulation::height_field::HeightField;
use simulation::index_bake::bake_tile_index;
use simulation::palette::{resolve_keys, TileCoord};
use simulation::settings::WaterSettings;
use simulation::terrain_color::{pixels_match, render_terrain_color, TileSheet};
use simulation::voxel::{build_voxel_mesh, VoxelParams};
use simulation::water::{advance_frame, step, WaterParams, WaterSimulationState};

const LOWLAND: [&str; 6] = ["5X23", "11X2", "12X8", "13X5", "14X12", "22X27"];

/// Sheet with 2x2-pixel tiles where every texel encodes its own tile.
fn coded_sheet() -> TileSheet {
    let (tiles_x, tiles_y, ts) = (64, 95, 2);
    let (w, h) = (tiles_x * ts, tiles_y * ts);
    let mut data = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[(x / ts) as u8, (y / ts) as u8, 0, 255]);
        }
    }
    TileSheet::from_rgba8(w, h, data).unwrap().with_tile_size(ts, ts)
}

// ---------------------------------------------------------------------------
// 1. Bake + color pass agree on which tile each cell shows
// ---------------------------------------------------------------------------

#[test]
fn test_color_pass_shows_baked_tiles() {
    let palette = resolve_keys(&LOWLAND[..]).unwrap();
    let field = HeightField::builtin();
    let index = bake_tile_index(&field, &palette).unwrap();
    let map = render_terrain_color(&index, &coded_sheet());
    assert_eq!((map.width, map.height), (64, 64));

    for y in 0..32 {
        for x in 0..32 {
            let tile: TileCoord = index.tile(x, y);
            let px = map.texel(x * 2 + 1, y * 2 + 1);
            let expected = [tile.x as f32 / 255.0, tile.y as f32 / 255.0, 0.0, 1.0];
            let actual = px.map(|c| f32::from(c) / 255.0);
            assert!(
                pixels_match(expected, actual),
                "cell ({x},{y}) should show tile ({},{}), got {px:?}",
                tile.x,
                tile.y
            );
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Voxel mesh for the built-in map
// ---------------------------------------------------------------------------

#[test]
fn test_builtin_map_mesh_is_clipped_and_consistent() {
    let palette = resolve_keys(&LOWLAND[..]).unwrap();
    let index = bake_tile_index(&HeightField::builtin(), &palette).unwrap();
    let params = VoxelParams::default();
    let (mesh, stats) = build_voxel_mesh(&index, &params);

    assert!(stats.cubes >= 32 * 32, "every cell gets at least one cube");
    assert_eq!(stats.vertices, mesh.vertex_count());
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertex_count()));
    let max_y = mesh.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
    assert!(max_y <= params.clip_y() + 1e-5, "geometry above the clip plane: {max_y}");
}

// ---------------------------------------------------------------------------
// 3. Water engine driven like the frame driver does
// ---------------------------------------------------------------------------

#[test]
fn test_water_engine_over_simulated_minute() {
    let params = WaterParams::from_settings(&WaterSettings {
        grid_size: 48,
        ..WaterSettings::default()
    });
    let mut state = WaterSimulationState::new(48);
    let mut ticks = 0;
    for _ in 0..600 {
        ticks += advance_frame(&mut state, &params, 0.1, None, false).ticks;
    }
    // 0.1 s frames owe 2.5 ticks each, one runs per frame.
    assert_eq!(ticks, 600);
    assert_eq!(state.tick, 600);
    assert!(state.current_displacement().all_finite());
    assert!(state.color.all_finite());
}

#[test]
fn test_ping_pong_slot_alternates() {
    let params = WaterParams::default();
    let mut state = WaterSimulationState::new(8);
    for n in 0..10u64 {
        assert_eq!(state.current_index() as u64, n % 2);
        step(&mut state, &params.step);
    }
}
