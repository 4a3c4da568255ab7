//! Per-texel kernels, one function per pass. Every kernel reads its inputs
//! through shared references and writes a single output grid; none of them
//! keep state between calls.

use std::f32::consts::TAU;

use bevy::math::{Vec2, Vec3};
use fastnoise_lite::{FastNoiseLite, NoiseType};

use super::types::{opposite, FlowParams, SeedParams, ShadeParams, DIR_OFFSETS, DISP_HEIGHT};
use crate::float_grid::Grid4;
use crate::parallel::par_rows_mut;
use crate::settings::WaveTrain;
use crate::terrain_color::TerrainColorMap;

// ---------------------------------------------------------------------------
// SEED
// ---------------------------------------------------------------------------

/// Height of one wave train at normalized position `(u, v)` and time `t`.
///
/// The direction is snapped to a whole number of cycles across the grid on
/// each axis, so the field tiles seamlessly under wrapped addressing.
pub fn wave_height(train: &WaveTrain, u: f32, v: f32, t: f32) -> f32 {
    if train.wavelength <= 0.0 {
        return 0.0;
    }
    let dir = Vec2::from(train.direction).normalize_or_zero();
    let cycles = (dir / train.wavelength).round();
    let omega = TAU * train.speed / train.wavelength;
    let phase = TAU * (cycles.x * u + cycles.y * v) - omega * t;
    // Second-order trochoid term sharpens crests and flattens troughs.
    train.amplitude * (phase.sin() - 0.5 * train.steepness * (2.0 * phase).cos())
}

/// Write the initial displacement field: the sum of all wave trains at time
/// `t`, plus an optional simplex noise term.
pub fn seed(params: &SeedParams, t: f32, out: &mut Grid4) {
    let size = out.width;
    let height = out.height;
    let noise = (params.noise_amplitude != 0.0).then(|| {
        let mut n = FastNoiseLite::with_seed(params.noise_seed);
        n.set_noise_type(Some(NoiseType::OpenSimplex2));
        n.set_frequency(Some(params.noise_frequency));
        n
    });

    par_rows_mut(&mut out.cells, size, |y, row| {
        let v = (y as f32 + 0.5) / height as f32;
        for (x, texel) in row.iter_mut().enumerate() {
            let u = (x as f32 + 0.5) / size as f32;
            let mut h: f32 = params.trains.iter().map(|w| wave_height(w, u, v, t)).sum();
            if let Some(noise) = &noise {
                h += params.noise_amplitude * noise.get_noise_2d(x as f32, y as f32);
            }
            *texel = [h, h, 0.0, 0.0];
        }
    });
}

// ---------------------------------------------------------------------------
// TRANSFER
// ---------------------------------------------------------------------------

/// Outflow from each cell to its four neighbors.
///
/// Per direction, the raw flow is the height drop to that neighbor scaled by
/// `flow_rate`, plus the cell's current velocity and last tick's transfer in
/// that direction, floored at zero. If the four raw flows add up to more than
/// `max_outflow` they are scaled down together so they sum to exactly that.
pub fn transfer(
    displacement: &Grid4,
    velocity: &Grid4,
    previous: &Grid4,
    params: &FlowParams,
    out: &mut Grid4,
) {
    let width = out.width;
    par_rows_mut(&mut out.cells, width, |y, row| {
        for (x, texel) in row.iter_mut().enumerate() {
            let h = displacement.get(x, y)[DISP_HEIGHT];
            let vel = velocity.get(x, y);
            let prev = previous.get(x, y);
            let mut flows = [0.0f32; 4];
            for (d, (dx, dy)) in DIR_OFFSETS.iter().enumerate() {
                let hn = displacement.get_wrapped(x as isize + dx, y as isize + dy)[DISP_HEIGHT];
                let raw = params.flow_rate * (h - hn)
                    + params.inertia * vel[d]
                    + params.transfer_memory * prev[d];
                flows[d] = raw.max(0.0);
            }
            let total: f32 = flows.iter().sum();
            if total > params.max_outflow {
                let scale = params.max_outflow / total;
                for f in &mut flows {
                    *f *= scale;
                }
            }
            *texel = flows;
        }
    });
}

// ---------------------------------------------------------------------------
// DISPLACE
// ---------------------------------------------------------------------------

/// Move water along the transfer grid: each cell loses its outflow and gains
/// what its neighbors sent toward it. With `decay == 1` and wrapped edges the
/// grid total is unchanged.
pub fn displace(displacement: &Grid4, transfer: &Grid4, decay: f32, out: &mut Grid4) {
    let width = out.width;
    par_rows_mut(&mut out.cells, width, |y, row| {
        for (x, texel) in row.iter_mut().enumerate() {
            let h = displacement.get(x, y)[DISP_HEIGHT];
            let outflow: f32 = transfer.get(x, y).iter().sum();
            let inflow: f32 = DIR_OFFSETS
                .iter()
                .enumerate()
                .map(|(d, (dx, dy))| {
                    transfer.get_wrapped(x as isize + dx, y as isize + dy)[opposite(d)]
                })
                .sum();
            let next = (h - outflow + inflow) * decay;
            *texel = [next, h, inflow, outflow];
        }
    });
}

// ---------------------------------------------------------------------------
// VELOCITY
// ---------------------------------------------------------------------------

/// Velocity per direction: half the change in transfer over the last tick.
pub fn velocity(transfer_now: &Grid4, transfer_before: &Grid4, out: &mut Grid4) {
    for ((v, now), before) in out
        .cells
        .iter_mut()
        .zip(&transfer_now.cells)
        .zip(&transfer_before.cells)
    {
        *v = std::array::from_fn(|lane| 0.5 * (now[lane] - before[lane]));
    }
}

// ---------------------------------------------------------------------------
// SMOOTH
// ---------------------------------------------------------------------------

const BLUR_WEIGHTS: [[f32; 3]; 3] = [
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
];

/// 3x3 binomial blur of the height lane, wrapped. Output lanes are
/// `[smoothed, raw, 0, 1]`.
pub fn smooth(displacement: &Grid4, out: &mut Grid4) {
    let width = out.width;
    par_rows_mut(&mut out.cells, width, |y, row| {
        for (x, texel) in row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (j, weights) in BLUR_WEIGHTS.iter().enumerate() {
                for (i, w) in weights.iter().enumerate() {
                    let sx = x as isize + i as isize - 1;
                    let sy = y as isize + j as isize - 1;
                    acc += w * displacement.get_wrapped(sx, sy)[DISP_HEIGHT];
                }
            }
            *texel = [acc, displacement.get(x, y)[DISP_HEIGHT], 0.0, 1.0];
        }
    });
}

// ---------------------------------------------------------------------------
// NORMALS
// ---------------------------------------------------------------------------

/// Surface normal from central differences of the smoothed height.
///
/// `texel_size` is the world distance between texels and `height_scale` the
/// world height of one displacement unit. The tangents along X and Z are
/// crossed, giving `(-dh/dx, 2 * texel_size, -dh/dz)` before normalization.
pub fn normals(smoothed: &Grid4, texel_size: f32, height_scale: f32, out: &mut Grid4) {
    let width = out.width;
    par_rows_mut(&mut out.cells, width, |y, row| {
        let y = y as isize;
        for (x, texel) in row.iter_mut().enumerate() {
            let x = x as isize;
            let h = |dx: isize, dy: isize| smoothed.get_wrapped(x + dx, y + dy)[0];
            let dhx = (h(1, 0) - h(-1, 0)) * height_scale;
            let dhz = (h(0, 1) - h(0, -1)) * height_scale;
            let n = Vec3::new(-dhx, 2.0 * texel_size, -dhz).normalize_or(Vec3::Y);
            *texel = [n.x, n.y, n.z, 0.0];
        }
    });
}

// ---------------------------------------------------------------------------
// SURFACE_COLOR
// ---------------------------------------------------------------------------

/// Refract `incident` through a surface with unit normal `normal`, going from
/// a medium with relative index `eta`. `None` on total internal reflection.
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = -normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident + (eta * cos_i - k.sqrt()) * normal)
}

/// Color of the ground seen straight down through the water at `(u, v)`, or
/// `None` when the refracted ray never reaches the refraction plane.
pub fn refracted_ground(
    terrain: &TerrainColorMap,
    params: &ShadeParams,
    u: f32,
    v: f32,
    surface_height: f32,
    normal: Vec3,
) -> Option<[f32; 3]> {
    let ray = refract(Vec3::NEG_Y, normal, params.eta)?;
    if ray.y > -1e-4 {
        return None;
    }
    let origin = Vec3::new(
        (u - 0.5) * params.world_size.x,
        surface_height * params.displacement_scale,
        (v - 0.5) * params.world_size.y,
    );
    let t = (origin.y + params.refraction_depth) / -ray.y;
    if t < 0.0 {
        return None;
    }
    let hit = origin + ray * t;
    let hu = hit.x / params.world_size.x + 0.5;
    let hv = hit.z / params.world_size.y + 0.5;
    Some(terrain.sample_rgb(hu, hv))
}

/// Lit water color for one texel.
pub fn shade_texel(
    terrain: Option<&TerrainColorMap>,
    params: &ShadeParams,
    u: f32,
    v: f32,
    surface_height: f32,
    normal: Vec3,
) -> [f32; 4] {
    let tint = params.tint;
    let base = match terrain.and_then(|t| refracted_ground(t, params, u, v, surface_height, normal)) {
        Some(ground) => {
            let s = params.tint_strength;
            [
                ground[0] + (tint[0] - ground[0]) * s,
                ground[1] + (tint[1] - ground[1]) * s,
                ground[2] + (tint[2] - ground[2]) * s,
            ]
        }
        None => tint,
    };
    let light = params.light_direction.normalize_or(Vec3::Y);
    let diffuse = normal.dot(light).max(0.0);
    let lit = params.ambient + (1.0 - params.ambient) * diffuse;
    [
        (base[0] * lit).clamp(0.0, 1.0),
        (base[1] * lit).clamp(0.0, 1.0),
        (base[2] * lit).clamp(0.0, 1.0),
        1.0,
    ]
}

/// Lit color for every texel of the water grid.
pub fn surface_color(
    smoothed: &Grid4,
    normals: &Grid4,
    terrain: Option<&TerrainColorMap>,
    params: &ShadeParams,
    out: &mut Grid4,
) {
    let width = out.width;
    let height = out.height;
    par_rows_mut(&mut out.cells, width, |y, row| {
        let v = (y as f32 + 0.5) / height as f32;
        for (x, texel) in row.iter_mut().enumerate() {
            let u = (x as f32 + 0.5) / width as f32;
            let n = normals.get(x, y);
            let normal = Vec3::new(n[0], n[1], n[2]);
            *texel = shade_texel(terrain, params, u, v, smoothed.get(x, y)[0], normal);
        }
    });
}
