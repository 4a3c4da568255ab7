//! Criterion benchmark: one water tick and one frame's derived passes.
//!
//! Grid sizes 256, 512 and the default 1024. A frame at 60 Hz leaves about
//! 16 ms for the tick plus SMOOTH, NORMALS and SURFACE_COLOR.
//!
//! Run with: cargo bench -p simulation --bench water_tick_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use simulation::settings::WaterSettings;
use simulation::water::{derive, step, WaterParams, WaterSimulationState};

fn prepared(size: usize) -> (WaterSimulationState, WaterParams) {
    let params = WaterParams::from_settings(&WaterSettings {
        grid_size: size,
        ..WaterSettings::default()
    });
    let mut state = WaterSimulationState::new(size);
    // Get past the seed tick so every iteration measures steady state.
    step(&mut state, &params.step);
    (state, params)
}

fn bench_water(c: &mut Criterion) {
    let mut group = c.benchmark_group("water");
    group.sample_size(10);

    for size in [256usize, 512, 1024] {
        let (mut state, params) = prepared(size);
        group.bench_with_input(BenchmarkId::new("tick", size), &size, |b, _| {
            b.iter(|| step(&mut state, &params.step));
        });

        let (mut state, params) = prepared(size);
        group.bench_with_input(BenchmarkId::new("derive", size), &size, |b, _| {
            b.iter(|| derive(&mut state, &params, None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_water);
criterion_main!(benches);
