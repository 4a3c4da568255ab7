use crate::height_field::HeightField;
use crate::index_bake::palette_index;
use crate::palette::PaletteSelection;
use crate::test_harness::TestScene;
use crate::tile_catalog::{preset, DEFAULT_PRESET};

// ====================================================================
// Startup: palette, bake and geometry
// ====================================================================

#[test]
fn test_default_scene_builds() {
    let scene = TestScene::new();
    scene.assert_setup_ok();
    assert!(!scene.exit_requested());
    scene.assert_water_tick(0);
}

#[test]
fn test_default_preset_is_resolved_in_order() {
    let scene = TestScene::new();
    let expected = preset(DEFAULT_PRESET).unwrap();
    let got: Vec<String> = scene.palette().keys.iter().map(ToString::to_string).collect();
    assert_eq!(got, expected.to_vec());
}

#[test]
fn test_index_reads_height_rows_flipped() {
    let scene = TestScene::new();
    let field = HeightField::builtin();
    let index = scene.index();
    assert_eq!(index.width(), 32);
    // Authored row 4, column 0 lands on output row 31 - 4.
    let h = index.cell_height(0, 27);
    assert!(
        (h - f32::from(field.sample(4, 0)) / 256.0).abs() < 1e-6,
        "cell (0,27) should carry sample (4,0), got {h}"
    );
    assert_eq!(index.band(0, 27), palette_index(h));
}

#[test]
fn test_flat_zero_field_uses_lowest_band_everywhere() {
    let scene = TestScene::with_height_field(TestScene::small_config(), HeightField::filled(8, 8, 0));
    scene.assert_setup_ok();
    let low = scene.palette().tiles[0];
    let index = scene.index();
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(index.tile(x, y), low, "cell ({x},{y}) should use band 0");
        }
    }
    // Height 0 columns hold cubes at 0, -1 and -2.
    assert_eq!(scene.geometry().stats.cubes, 8 * 8 * 3);
}

#[test]
fn test_single_peak_lands_in_band_four() {
    let mut field = HeightField::filled(4, 4, 0);
    field.set(1, 2, 200);
    let scene = TestScene::with_height_field(TestScene::small_config(), field);
    let index = scene.index();
    // Row 1 of a 4-row field is output row 2.
    assert_eq!(index.band(2, 2), 4);
    assert_eq!(index.tile(2, 2), scene.palette().tiles[4]);
    assert_eq!(index.band(0, 0), 0);
}

#[test]
fn test_unknown_preset_stops_the_app() {
    let mut config = TestScene::small_config();
    config.terrain.selection = PaletteSelection::Preset {
        name: "atlantis".to_string(),
    };
    let scene = TestScene::with_config(config);
    let message = scene.setup_error().unwrap_or_default();
    assert!(message.contains("atlantis"), "error should name the preset, got {message:?}");
    assert!(scene.exit_requested(), "setup failure should request exit");
}

#[test]
fn test_invalid_water_grid_stops_the_app() {
    let mut config = TestScene::small_config();
    config.water.grid_size = 2;
    let scene = TestScene::with_config(config);
    assert!(scene.setup_error().is_some());
    assert!(scene.exit_requested());
}

#[test]
fn test_random_palette_puts_water_first() {
    let mut config = TestScene::small_config();
    config.terrain.selection = PaletteSelection::Random;
    let scene = TestScene::with_config(config);
    scene.assert_setup_ok();
    let first = scene.palette().keys[0].to_string();
    let path = crate::tile_catalog::catalog_path(&first).unwrap();
    assert!(path.contains("water"), "band 0 should be water, got {first} -> {path}");
}
