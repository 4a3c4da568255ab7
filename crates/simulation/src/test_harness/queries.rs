//! Query and stepping methods for `TestScene`.

use crate::frame::FrameCounter;
use crate::index_bake::TileIndexGrid;
use crate::palette::Palette;
use crate::terrain_color::TerrainColorMap;
use crate::water::{step, WaterFrameReport, WaterParams, WaterSimulationState};
use crate::world_init::{SetupFailed, TerrainGeometry};

use super::TestScene;

impl TestScene {
    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Run `n` water ticks directly, bypassing the frame accumulator.
    pub fn step_water(&mut self, n: u32) {
        let world = self.app.world_mut();
        let Some(params) = world.get_resource::<WaterParams>().map(|p| p.step.clone()) else {
            return;
        };
        let Some(mut state) = world.get_resource_mut::<WaterSimulationState>() else {
            return;
        };
        for _ in 0..n {
            step(&mut state, &params);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn palette(&self) -> &Palette {
        self.app.world().resource::<Palette>()
    }

    pub fn index(&self) -> &TileIndexGrid {
        self.app.world().resource::<TileIndexGrid>()
    }

    pub fn geometry(&self) -> &TerrainGeometry {
        self.app.world().resource::<TerrainGeometry>()
    }

    pub fn water(&self) -> &WaterSimulationState {
        self.app.world().resource::<WaterSimulationState>()
    }

    pub fn terrain_color(&self) -> Option<&TerrainColorMap> {
        self.app.world().get_resource::<TerrainColorMap>()
    }

    pub fn water_report(&self) -> WaterFrameReport {
        *self.app.world().resource::<WaterFrameReport>()
    }

    pub fn frame_count(&self) -> u64 {
        self.app.world().resource::<FrameCounter>().0
    }

    /// Completed water ticks.
    pub fn water_tick(&self) -> u64 {
        self.water().tick
    }

    pub fn water_volume(&self) -> f64 {
        self.water().total_volume()
    }

    /// Whether a system asked the app to exit.
    pub fn exit_requested(&self) -> bool {
        self.app.should_exit().is_some()
    }

    /// The setup error message, if startup failed.
    pub fn setup_error(&self) -> Option<&str> {
        self.app
            .world()
            .get_resource::<SetupFailed>()
            .map(|f| f.0.as_str())
    }
}
