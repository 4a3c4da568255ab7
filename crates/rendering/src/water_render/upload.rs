use simulation::float_grid::Grid4;

#[inline]
fn unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pack RGBA colors in `[0, 1]` into 8-bit texels.
pub fn color_bytes(grid: &Grid4, out: &mut [u8]) {
    for (texel, px) in grid.cells.iter().zip(out.chunks_exact_mut(4)) {
        px.copy_from_slice(&texel.map(unorm8));
    }
}

/// Lift each lid vertex to the smoothed water height under its UV.
pub fn displace_lid(positions: &mut [[f32; 3]], uvs: &[[f32; 2]], smoothed: &Grid4, scale: f32) {
    for (pos, uv) in positions.iter_mut().zip(uvs) {
        pos[1] = smoothed.sample_bilinear(uv[0], uv[1], 0) * scale;
    }
}
