//! Row-parallel helpers for the per-texel kernels.
//!
//! Every pass writes one output grid from read-only inputs, so rows can be
//! filled independently on the compute task pool.

use bevy::tasks::{ComputeTaskPool, ParallelSliceMut, TaskPool};

/// Call `f(y, row)` for every `width`-long row of `data`, spreading rows over
/// the compute pool. Falls back to a plain loop for tiny grids.
pub fn par_rows_mut<T, F>(mut data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if width == 0 || data.is_empty() {
        return;
    }
    let height = data.len() / width;
    if height < 16 {
        for (y, row) in data.chunks_mut(width).enumerate() {
            f(y, row);
        }
        return;
    }

    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    let rows_per_chunk = (height / (pool.thread_num().max(1) * 4)).max(1);
    data.par_chunk_map_mut(pool, rows_per_chunk * width, |chunk_idx, chunk| {
        let first_row = chunk_idx * rows_per_chunk;
        for (i, row) in chunk.chunks_mut(width).enumerate() {
            f(first_row + i, row);
        }
    });
}
