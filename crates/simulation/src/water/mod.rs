//! Water simulation engine.
//!
//! A cellular height-field model on a wrapped square grid, advanced in fixed
//! simulated-time ticks:
//!
//! - SEED (first tick only): sum of directional wave trains plus noise
//! - TRANSFER: per-direction outflow from height differences and momentum
//! - DISPLACE: move the outflow into neighbors
//! - VELOCITY: half the change in transfer since the previous tick
//!
//! After the ticks owed for a frame have run, SMOOTH, NORMALS and
//! SURFACE_COLOR derive the grids the renderer uploads.

pub mod kernels;
mod stepper;
mod systems;
mod types;

use bevy::prelude::*;

pub use stepper::{advance_frame, derive, run_frame_pass, run_tick_pass, step, MAX_OWED_TICKS};
pub use systems::{advance_water, WaterFrameReport};
pub use types::{
    opposite, FlowParams, FramePass, FrameReport, SeedParams, ShadeParams, StepParams, TickPass,
    WaterParams, WaterSimulationState, DIR_NEG_X, DIR_NEG_Y, DIR_OFFSETS, DIR_POS_X, DIR_POS_Y, DISP_HEIGHT,
    DISP_INFLOW, DISP_OUTFLOW, DISP_PREVIOUS,
};

use crate::FrameSet;

pub struct WaterPlugin;

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaterParams>()
            .init_resource::<WaterFrameReport>()
            .add_systems(Update, advance_water.in_set(FrameSet::Simulation));
    }
}
