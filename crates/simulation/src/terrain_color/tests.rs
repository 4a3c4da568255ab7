use super::*;
use crate::float_grid::Grid4;
use crate::index_bake::TileIndexGrid;

/// 4x2 tiles of 4x4 texels; each texel encodes (sheet x, sheet y, 7, 255).
fn coded_sheet() -> TileSheet {
    let (w, h) = (16, 8);
    let mut data = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[x as u8, y as u8, 7, 255]);
        }
    }
    TileSheet::from_rgba8(w, h, data).unwrap().with_tile_size(4, 4)
}

/// 2x2 map: cell (x, y) -> tile (tx, ty).
fn index_2x2(tiles: [[(u32, u32); 2]; 2]) -> TileIndexGrid {
    let mut grid = Grid4::new(2, 2);
    for (y, row) in tiles.iter().enumerate() {
        for (x, (tx, ty)) in row.iter().enumerate() {
            grid.set(x, y, [*tx as f32, *ty as f32, 0.5, 0.0]);
        }
    }
    TileIndexGrid { grid }
}

#[test]
fn test_color_pass_copies_tile_texels() {
    let sheet = coded_sheet();
    let index = index_2x2([[(0, 0), (3, 1)], [(2, 0), (1, 1)]]);
    let map = render_terrain_color(&index, &sheet);
    assert_eq!((map.width, map.height), (8, 8));

    for py in 0..8 {
        for px in 0..8 {
            let tile = index.tile(px / 4, py / 4);
            let expected_x = tile.x as usize * 4 + px % 4;
            let expected_y = tile.y as usize * 4 + py % 4;
            let got = map.texel(px, py);
            assert_eq!(
                (got[0] as usize, got[1] as usize),
                (expected_x, expected_y),
                "pixel ({px},{py}) should come from sheet ({expected_x},{expected_y})"
            );
        }
    }
}

#[test]
fn test_resolve_color_at_cell_corner_and_center() {
    let sheet = coded_sheet();
    let index = index_2x2([[(1, 0), (0, 0)], [(0, 0), (0, 0)]]);
    // Just inside the top-left cell, first texel of tile (1, 0).
    assert_eq!(resolve_color(&index, &sheet, 0.01, 0.01)[..2], [4, 0]);
    // Center of the top-left cell lands on local texel (2, 2).
    assert_eq!(resolve_color(&index, &sheet, 0.25, 0.25)[..2], [6, 2]);
}

#[test]
fn test_color_map_is_opaque_and_full_size() {
    let sheet = coded_sheet();
    let index = index_2x2([[(0, 0); 2]; 2]);
    let map = render_terrain_color(&index, &sheet);
    assert_eq!(map.data.len(), 8 * 8 * 4);
    assert!(map.data.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn test_sample_rgb_flat_region() {
    let map = TerrainColorMap {
        width: 2,
        height: 2,
        data: vec![255, 0, 0, 255].repeat(4),
    };
    let c = map.sample_rgb(0.3, 0.8);
    assert!((c[0] - 1.0).abs() < 1e-6 && c[1] == 0.0 && c[2] == 0.0, "got {c:?}");
}

#[test]
fn test_placeholder_sheet_is_deterministic_with_borders() {
    let a = placeholder_sheet(64, 64, 32, 32);
    let b = placeholder_sheet(64, 64, 32, 32);
    assert_eq!(a, b);
    let border = a.texel(0, 0);
    let interior = a.texel(5, 2);
    assert!(border[0] <= interior[0], "border should be darker than interior");
    assert_eq!(interior[3], 255);
}

#[test]
fn test_placeholder_water_tiles_are_blue() {
    let c = placeholder_tile_color(23, 5, Some(true));
    assert!(c[2] > c[0] && c[2] > c[1], "water tile should be blue-dominant, got {c:?}");
}

#[test]
fn test_pixels_match_tolerance() {
    let expected = [0.5, 0.5, 0.5, 1.0];
    assert!(pixels_match(expected, [0.5 + 0.9 / 255.0, 0.5, 0.5, 1.0]));
    assert!(!pixels_match(expected, [0.5 + 2.0 / 255.0, 0.5, 0.5, 1.0]));
}

#[test]
fn test_pixels_match_skips_sentinel() {
    assert!(pixels_match(
        [PIXEL_SKIP_SENTINEL, -1.0, -1.0, -1.0],
        [0.9, 0.1, 0.3, 1.0]
    ));
}

#[test]
fn test_sheet_rejects_wrong_length() {
    assert!(TileSheet::from_rgba8(4, 4, vec![0; 10]).is_err());
}
