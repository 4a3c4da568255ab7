//! The water state machine: one fixed-timestep tick, and the per-frame driver
//! that banks wall-clock time and decides how many ticks to run.

use bevy::prelude::*;

use super::kernels;
use super::types::{FramePass, FrameReport, StepParams, TickPass, WaterParams, WaterSimulationState};
use crate::terrain_color::TerrainColorMap;

/// Owed simulated time is capped at this many ticks so a long stall cannot
/// grow the accumulator without bound.
pub const MAX_OWED_TICKS: u32 = 64;

/// Run one tick pass. Reads slot `tick % 2` and writes slot
/// `(tick + 1) % 2`; TRANSFER must run before DISPLACE and VELOCITY so they
/// see this tick's flow in the write slot.
pub fn run_tick_pass(pass: TickPass, state: &mut WaterSimulationState, params: &StepParams) {
    let n = state.tick;
    match pass {
        TickPass::Seed => {
            let slot = state.current_index();
            kernels::seed(&params.seed, state.sim_time, state.displacement.slot_mut(slot));
            for i in 0..2 {
                state.velocity.slot_mut(i).cells.fill([0.0; 4]);
                state.transfer.slot_mut(i).cells.fill([0.0; 4]);
            }
        }
        TickPass::Transfer => {
            let (before, after) = state.transfer.read_write(n);
            kernels::transfer(
                state.displacement.current(n),
                state.velocity.current(n),
                before,
                &params.flow,
                after,
            );
        }
        TickPass::Displace => {
            let transfer_now = state.transfer.current(n + 1);
            let (read, write) = state.displacement.read_write(n);
            kernels::displace(read, transfer_now, params.decay, write);
        }
        TickPass::Velocity => {
            let transfer_now = state.transfer.current(n + 1);
            let transfer_before = state.transfer.previous(n + 1);
            let (_, write) = state.velocity.read_write(n);
            kernels::velocity(transfer_now, transfer_before, write);
        }
    }
}

/// Run one tick: SEED on the very first tick, then `TickPass::ORDER`, then
/// advance the tick counter.
pub fn step(state: &mut WaterSimulationState, params: &StepParams) {
    if state.tick == 0 {
        run_tick_pass(TickPass::Seed, state, params);
        info!(
            "water seeded: {}x{} grid, {} wave trains",
            state.size,
            state.size,
            params.seed.trains.len()
        );
    }

    for pass in TickPass::ORDER {
        run_tick_pass(pass, state, params);
    }

    state.tick += 1;
    state.sim_time += params.timestep;
}

/// Rebuild one per-frame grid from the current displacement.
pub fn run_frame_pass(
    pass: FramePass,
    state: &mut WaterSimulationState,
    params: &WaterParams,
    terrain: Option<&TerrainColorMap>,
) {
    match pass {
        FramePass::Smooth => {
            kernels::smooth(state.displacement.current(state.tick), &mut state.smoothed);
        }
        FramePass::Normals => {
            let texel_size = params.shade.world_size.x / state.size as f32;
            kernels::normals(
                &state.smoothed,
                texel_size,
                params.shade.displacement_scale,
                &mut state.normals,
            );
        }
        FramePass::SurfaceColor => {
            kernels::surface_color(
                &state.smoothed,
                &state.normals,
                terrain,
                &params.shade,
                &mut state.color,
            );
        }
    }
}

/// Rebuild the per-frame grids (SMOOTH, NORMALS, SURFACE_COLOR).
pub fn derive(state: &mut WaterSimulationState, params: &WaterParams, terrain: Option<&TerrainColorMap>) {
    for pass in FramePass::ORDER {
        run_frame_pass(pass, state, params, terrain);
    }
    state.derived_tick = Some(state.tick);
}

/// Advance the engine by one displayed frame of `dt` wall-clock seconds.
///
/// Elapsed time is scaled into simulated time and banked. While at least one
/// timestep is banked, a tick runs, up to `params.tick_limit()` ticks per
/// frame; the default limit is one, so a slow frame leaves time owed for
/// later frames instead of catching up at once. The derived grids are rebuilt
/// when a tick ran, when they were never built, or when `terrain_changed`.
pub fn advance_frame(
    state: &mut WaterSimulationState,
    params: &WaterParams,
    dt: f32,
    terrain: Option<&TerrainColorMap>,
    terrain_changed: bool,
) -> FrameReport {
    let timestep = params.step.timestep;
    state.accumulator += dt.max(0.0) * params.time_scale;

    let limit = params.tick_limit();
    let mut ticks = 0;
    while ticks < limit && state.accumulator >= timestep {
        step(state, &params.step);
        state.accumulator -= timestep;
        ticks += 1;
    }
    state.accumulator = state.accumulator.min(timestep * MAX_OWED_TICKS as f32);

    let derived = ticks > 0 || state.derived_tick != Some(state.tick) || terrain_changed;
    if derived {
        derive(state, params, terrain);
    }
    FrameReport { ticks, derived }
}
