//! Assertion helpers for `TestScene` integration tests.

use super::TestScene;

impl TestScene {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert startup completed and produced every resource the renderer needs.
    pub fn assert_setup_ok(&self) {
        assert!(
            self.setup_error().is_none(),
            "Expected setup to succeed, got error: {:?}",
            self.setup_error()
        );
        let geometry = self.geometry();
        assert!(
            geometry.voxels.vertex_count() > 0,
            "Expected a non-empty voxel mesh"
        );
    }

    /// Assert the water engine has completed exactly `n` ticks.
    pub fn assert_water_tick(&self, n: u64) {
        let tick = self.water_tick();
        assert_eq!(tick, n, "Expected water tick {n}, got {tick}");
    }

    /// Assert every water grid holds finite values.
    pub fn assert_water_finite(&self) {
        let water = self.water();
        assert!(
            water.current_displacement().all_finite(),
            "Displacement went non-finite at tick {}",
            water.tick
        );
        assert!(
            water.current_velocity().all_finite(),
            "Velocity went non-finite at tick {}",
            water.tick
        );
        assert!(water.color.all_finite(), "Surface color went non-finite");
        assert!(water.normals.all_finite(), "Normals went non-finite");
    }

    /// Assert total water volume is within `tolerance` (relative) of `expected`.
    pub fn assert_volume_near(&self, expected: f64, tolerance: f64) {
        let volume = self.water_volume();
        let allowed = tolerance * (1.0 + expected.abs());
        assert!(
            (volume - expected).abs() <= allowed,
            "Expected water volume {expected} +/- {allowed}, got {volume}"
        );
    }
}
