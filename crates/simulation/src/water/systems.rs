use bevy::prelude::*;

use super::stepper::advance_frame;
use super::types::{FrameReport, WaterParams, WaterSimulationState};
use crate::frame::FrameClock;
use crate::terrain_color::TerrainColorMap;

/// Outcome of the latest frame of the water engine.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct WaterFrameReport {
    pub last: FrameReport,
    pub total_ticks: u64,
}

/// Per-frame water update. Runs after the frame clock so `delta` is fresh.
pub fn advance_water(
    clock: Res<FrameClock>,
    params: Res<WaterParams>,
    terrain: Option<Res<TerrainColorMap>>,
    state: Option<ResMut<WaterSimulationState>>,
    mut report: ResMut<WaterFrameReport>,
) {
    let Some(mut state) = state else {
        return;
    };
    let terrain_changed = terrain.as_ref().is_some_and(|t| t.is_changed());
    let last = advance_frame(
        &mut state,
        &params,
        clock.delta,
        terrain.as_deref(),
        terrain_changed,
    );
    report.last = last;
    report.total_ticks += u64::from(last.ticks);
}
