use bevy::prelude::*;

use crate::config::{MAP_HEIGHT_IN_3D_UNITS, MAP_WIDTH_IN_3D_UNITS, WATER_ETA};
use crate::error::SetupError;
use crate::float_grid::{Grid4, PingPong};
use crate::settings::{WaterSettings, WaveTrain};

/// Share of light that reaches the water regardless of facing.
const AMBIENT_LIGHT: f32 = 0.35;

// ---------------------------------------------------------------------------
// Lane layouts
// ---------------------------------------------------------------------------

/// Displacement texel: height after the tick, height before it, and the
/// inflow and outflow that moved it.
pub const DISP_HEIGHT: usize = 0;
pub const DISP_PREVIOUS: usize = 1;
pub const DISP_INFLOW: usize = 2;
pub const DISP_OUTFLOW: usize = 3;

/// Transfer and velocity texels hold one value per direction.
pub const DIR_POS_X: usize = 0;
pub const DIR_NEG_X: usize = 1;
pub const DIR_POS_Y: usize = 2;
pub const DIR_NEG_Y: usize = 3;

/// Grid offset of each direction lane, in lane order.
pub const DIR_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Lane that receives flow sent along `dir`, seen from the receiving cell.
#[inline]
pub const fn opposite(dir: usize) -> usize {
    dir ^ 1
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Stages of one fixed-timestep tick, each backed by its own kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPass {
    Seed,
    Transfer,
    Displace,
    Velocity,
}

impl TickPass {
    /// Order of every tick after the first; tick 0 runs `Seed` ahead of these.
    pub const ORDER: [TickPass; 3] = [TickPass::Transfer, TickPass::Displace, TickPass::Velocity];
}

/// Stages rebuilt once per frame from the latest displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePass {
    Smooth,
    Normals,
    SurfaceColor,
}

impl FramePass {
    pub const ORDER: [FramePass; 3] = [FramePass::Smooth, FramePass::Normals, FramePass::SurfaceColor];
}

// ---------------------------------------------------------------------------
// Pass parameters
// ---------------------------------------------------------------------------

/// Parameters of the TRANSFER pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    pub flow_rate: f32,
    pub inertia: f32,
    pub transfer_memory: f32,
    pub max_outflow: f32,
}

/// Parameters of the SEED pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedParams {
    pub trains: Vec<WaveTrain>,
    pub noise_amplitude: f32,
    pub noise_frequency: f32,
    pub noise_seed: i32,
}

/// Parameters of the SURFACE_COLOR pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeParams {
    pub eta: f32,
    pub refraction_depth: f32,
    pub displacement_scale: f32,
    pub light_direction: Vec3,
    pub tint: [f32; 3],
    pub tint_strength: f32,
    pub ambient: f32,
    /// World extent of the grid on X and Z.
    pub world_size: Vec2,
}

/// One fixed-timestep tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepParams {
    pub flow: FlowParams,
    pub seed: SeedParams,
    pub decay: f32,
    pub timestep: f32,
}

impl StepParams {
    pub fn from_settings(settings: &WaterSettings) -> Self {
        Self {
            flow: FlowParams {
                flow_rate: settings.flow_rate,
                inertia: settings.inertia,
                transfer_memory: settings.transfer_memory,
                max_outflow: settings.max_outflow,
            },
            seed: SeedParams {
                trains: settings.wave_trains.clone(),
                noise_amplitude: settings.seed_noise_amplitude,
                noise_frequency: settings.seed_noise_frequency,
                noise_seed: settings.seed_noise_seed,
            },
            decay: settings.decay,
            timestep: settings.timestep,
        }
    }
}

/// Everything the engine needs per frame, derived once from `WaterSettings`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WaterParams {
    pub step: StepParams,
    pub shade: ShadeParams,
    pub time_scale: f32,
    pub catch_up: bool,
    pub max_ticks_per_frame: u32,
}

impl WaterParams {
    pub fn from_settings(settings: &WaterSettings) -> Self {
        Self {
            step: StepParams::from_settings(settings),
            shade: ShadeParams {
                eta: WATER_ETA,
                refraction_depth: settings.refraction_depth,
                displacement_scale: settings.displacement_scale,
                light_direction: Vec3::from(settings.light_direction),
                tint: settings.tint,
                tint_strength: settings.tint_strength,
                ambient: AMBIENT_LIGHT,
                world_size: Vec2::new(MAP_WIDTH_IN_3D_UNITS, MAP_HEIGHT_IN_3D_UNITS),
            },
            time_scale: settings.time_scale,
            catch_up: settings.catch_up,
            max_ticks_per_frame: settings.max_ticks_per_frame,
        }
    }

    /// Most ticks one frame may run.
    #[inline]
    pub fn tick_limit(&self) -> u32 {
        if self.catch_up {
            self.max_ticks_per_frame.max(1)
        } else {
            1
        }
    }
}

impl Default for WaterParams {
    fn default() -> Self {
        Self::from_settings(&WaterSettings::default())
    }
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// All water state, owned by the simulation and advanced one tick at a time.
///
/// `tick` counts completed ticks. Slot `tick % 2` of each ping-pong arena is
/// current; the other slot holds the state one tick older.
#[derive(Resource, Debug, Clone)]
pub struct WaterSimulationState {
    pub size: usize,
    pub tick: u64,
    /// Simulated time owed but not yet spent on ticks.
    pub accumulator: f32,
    /// Simulated time covered by completed ticks.
    pub sim_time: f32,
    pub displacement: PingPong<Grid4>,
    pub velocity: PingPong<Grid4>,
    pub transfer: PingPong<Grid4>,
    /// Blurred height, lane 0. Rebuilt once per frame.
    pub smoothed: Grid4,
    /// Unit surface normal `(x, y, z)` in lanes 0..3.
    pub normals: Grid4,
    /// Lit surface color, RGBA in `[0, 1]`.
    pub color: Grid4,
    /// Whether the per-frame derived grids reflect the current tick.
    pub derived_tick: Option<u64>,
}

impl WaterSimulationState {
    pub fn new(size: usize) -> Self {
        let blank = Grid4::new(size, size);
        Self {
            size,
            tick: 0,
            accumulator: 0.0,
            sim_time: 0.0,
            displacement: PingPong::new(blank.clone()),
            velocity: PingPong::new(blank.clone()),
            transfer: PingPong::new(blank.clone()),
            smoothed: blank.clone(),
            normals: Grid4::filled(size, size, [0.0, 1.0, 0.0, 0.0]),
            color: blank,
            derived_tick: None,
        }
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        PingPong::<Grid4>::current_index(self.tick)
    }

    /// Displacement after the most recent tick.
    #[inline]
    pub fn current_displacement(&self) -> &Grid4 {
        self.displacement.current(self.tick)
    }

    /// Displacement one tick older than `current_displacement`.
    #[inline]
    pub fn previous_displacement(&self) -> &Grid4 {
        self.displacement.previous(self.tick)
    }

    #[inline]
    pub fn current_velocity(&self) -> &Grid4 {
        self.velocity.current(self.tick)
    }

    #[inline]
    pub fn current_transfer(&self) -> &Grid4 {
        self.transfer.current(self.tick)
    }

    /// Fail unless every grid is `size x size`. The passes index neighbors
    /// across grids and assume they line up.
    pub fn check_dims(&self) -> Result<(), SetupError> {
        let dims = (self.size, self.size);
        for slot in 0..2u64 {
            self.displacement.current(slot).expect_dims("water_displacement", dims)?;
            self.velocity.current(slot).expect_dims("water_velocity", dims)?;
            self.transfer.current(slot).expect_dims("water_transfer", dims)?;
        }
        self.smoothed.expect_dims("water_smoothed", dims)?;
        self.normals.expect_dims("water_normals", dims)?;
        self.color.expect_dims("water_color", dims)
    }

    /// Sum of water height across the current displacement grid.
    pub fn total_volume(&self) -> f64 {
        self.current_displacement().lane_sum(DISP_HEIGHT)
    }
}

/// What one frame of the water engine did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u32,
    pub derived: bool,
}
