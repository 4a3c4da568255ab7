use crate::test_harness::TestScene;

// ====================================================================
// Frame driver and water engine
// ====================================================================

#[test]
fn test_one_tick_per_frame_by_default() {
    let mut scene = TestScene::new();
    scene.frames(5);
    scene.assert_water_tick(5);
    let report = scene.water_report();
    assert_eq!(report.total_ticks, 5);
    assert_eq!(report.last.ticks, 1);
    assert!(report.last.derived);
}

#[test]
fn test_frame_counter_counts_every_update() {
    let mut scene = TestScene::new();
    scene.frames(3);
    // The startup update is a frame too.
    assert_eq!(scene.frame_count(), 4);
}

#[test]
fn test_short_frames_bank_time() {
    let mut scene = TestScene::new();
    scene.set_frame_seconds(0.011);
    scene.frames(3);
    scene.assert_water_tick(0);
    scene.frames(1);
    scene.assert_water_tick(1);
}

#[test]
fn test_catch_up_runs_several_ticks_per_frame() {
    let mut config = TestScene::small_config();
    config.water.catch_up = true;
    config.water.max_ticks_per_frame = 4;
    let mut scene = TestScene::with_config(config);
    scene.set_frame_seconds(0.2);
    scene.frames(1);
    scene.assert_water_tick(4);
    assert_eq!(scene.water_report().last.ticks, 4);
}

#[test]
fn test_volume_is_conserved_across_frames() {
    let mut scene = TestScene::new();
    scene.frames(1);
    let start = scene.water_volume();
    scene.frames(40);
    scene.assert_volume_near(start, 1e-3);
}

#[test]
fn test_water_stays_finite_over_many_frames() {
    let mut scene = TestScene::new().with_placeholder_terrain();
    scene.frames(200);
    scene.assert_water_finite();
}

#[test]
fn test_direct_steps_match_frame_steps() {
    let mut by_frames = TestScene::new();
    by_frames.frames(6);
    let mut by_steps = TestScene::new();
    by_steps.step_water(6);
    assert_eq!(
        by_frames.water().current_displacement(),
        by_steps.water().current_displacement()
    );
}

#[test]
fn test_terrain_shows_through_the_water() {
    let mut plain = TestScene::new();
    let mut over_terrain = TestScene::new().with_placeholder_terrain();
    assert!(over_terrain.terrain_color().is_some());
    plain.frames(2);
    over_terrain.frames(2);
    assert_ne!(
        plain.water().color,
        over_terrain.water().color,
        "refracted terrain should change the surface color"
    );
}
