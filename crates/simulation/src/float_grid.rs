//! Four-lane float grids and the two-slot ping-pong arena used by every pass.
//!
//! A `Grid4` is the CPU form of an RGBA32F render target: `width * height`
//! texels stored row-major (`y * width + x`), each holding four `f32` lanes.

use crate::config::FLOAT_SIZE;
use crate::error::SetupError;

pub type Texel = [f32; FLOAT_SIZE];

// ---------------------------------------------------------------------------
// Grid4
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Grid4 {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Texel>,
}

impl Grid4 {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, [0.0; FLOAT_SIZE])
    }

    pub fn filled(width: usize, height: usize, value: Texel) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Texel {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: Texel) {
        let idx = self.index(x, y);
        self.cells[idx] = val;
    }

    /// Texel at a signed position, wrapping on both axes (repeat addressing).
    #[inline]
    pub fn get_wrapped(&self, x: isize, y: isize) -> Texel {
        let wx = x.rem_euclid(self.width as isize) as usize;
        let wy = y.rem_euclid(self.height as isize) as usize;
        self.cells[wy * self.width + wx]
    }

    /// Nearest texel for a normalized coordinate, repeat addressing.
    /// Texel `i` covers `[i / n, (i + 1) / n)`.
    #[inline]
    pub fn sample_nearest(&self, u: f32, v: f32) -> Texel {
        let x = (u * self.width as f32).floor() as isize;
        let y = (v * self.height as f32).floor() as isize;
        self.get_wrapped(x, y)
    }

    /// Bilinear sample of one lane at a normalized coordinate, repeat
    /// addressing, texel centers at `(i + 0.5) / n`.
    pub fn sample_bilinear(&self, u: f32, v: f32, lane: usize) -> f32 {
        let fx = u * self.width as f32 - 0.5;
        let fy = v * self.height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as isize, y0 as isize);
        let a = self.get_wrapped(x0, y0)[lane];
        let b = self.get_wrapped(x0 + 1, y0)[lane];
        let c = self.get_wrapped(x0, y0 + 1)[lane];
        let d = self.get_wrapped(x0 + 1, y0 + 1)[lane];
        let top = a + (b - a) * tx;
        let bottom = c + (d - c) * tx;
        top + (bottom - top) * ty
    }

    /// Sum of one lane across the grid, accumulated in f64.
    pub fn lane_sum(&self, lane: usize) -> f64 {
        self.cells.iter().map(|t| f64::from(t[lane])).sum()
    }

    /// Whether every lane of every texel is finite.
    pub fn all_finite(&self) -> bool {
        self.cells.iter().all(|t| t.iter().all(|v| v.is_finite()))
    }

    /// Fail unless this grid has the given dimensions.
    pub fn expect_dims(&self, what: &'static str, dims: (usize, usize)) -> Result<(), SetupError> {
        if self.dims() != dims {
            return Err(SetupError::GridMismatch {
                what,
                expected: dims,
                found: self.dims(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PingPong
// ---------------------------------------------------------------------------

/// Two buffers indexed by tick parity. At tick `n` the buffer at `n % 2` is
/// current (read); the step writes `(n + 1) % 2`, which becomes current once
/// the tick counter advances.
#[derive(Debug, Clone, PartialEq)]
pub struct PingPong<T> {
    slots: [T; 2],
}

impl<T: Clone> PingPong<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slots: [initial.clone(), initial],
        }
    }
}

impl<T> PingPong<T> {
    pub fn from_slots(slots: [T; 2]) -> Self {
        Self { slots }
    }

    #[inline]
    pub fn current_index(tick: u64) -> usize {
        (tick % 2) as usize
    }

    /// Buffer holding the state after `tick` completed ticks.
    #[inline]
    pub fn current(&self, tick: u64) -> &T {
        &self.slots[Self::current_index(tick)]
    }

    /// The other buffer: the state one tick older than `current`.
    #[inline]
    pub fn previous(&self, tick: u64) -> &T {
        &self.slots[1 - Self::current_index(tick)]
    }

    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }

    /// Split into (read, write) for the step taken at `tick`.
    pub fn read_write(&mut self, tick: u64) -> (&T, &mut T) {
        let (first, second) = self.slots.split_at_mut(1);
        if Self::current_index(tick) == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_wrapped_wraps_both_axes() {
        let mut g = Grid4::new(4, 3);
        g.set(3, 2, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(g.get_wrapped(-1, -1), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(g.get_wrapped(7, 5), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sample_nearest_picks_covering_texel() {
        let mut g = Grid4::new(4, 4);
        g.set(2, 1, [9.0; 4]);
        // u in [0.5, 0.75) and v in [0.25, 0.5) cover texel (2, 1).
        assert_eq!(g.sample_nearest(0.6, 0.3)[0], 9.0);
        assert_eq!(g.sample_nearest(0.74, 0.49)[0], 9.0);
        assert_eq!(g.sample_nearest(0.76, 0.3)[0], 0.0);
    }

    #[test]
    fn test_sample_bilinear_at_texel_center_is_exact() {
        let mut g = Grid4::new(4, 4);
        g.set(1, 1, [5.0; 4]);
        let v = g.sample_bilinear(1.5 / 4.0, 1.5 / 4.0, 0);
        assert!((v - 5.0).abs() < 1e-5, "center sample should be 5.0, got {v}");
        let mid = g.sample_bilinear(2.0 / 4.0, 1.5 / 4.0, 0);
        assert!((mid - 2.5).abs() < 1e-5, "midway sample should be 2.5, got {mid}");
    }

    #[test]
    fn test_expect_dims() {
        let g = Grid4::new(8, 4);
        assert!(g.expect_dims("test", (8, 4)).is_ok());
        assert!(matches!(
            g.expect_dims("test", (4, 8)),
            Err(SetupError::GridMismatch { .. })
        ));
    }

    #[test]
    fn test_ping_pong_parity() {
        let mut pp = PingPong::from_slots([0u32, 0u32]);
        for tick in 0..10u64 {
            let (read, write) = pp.read_write(tick);
            *write = *read + 1;
        }
        // After N steps the current slot is N % 2 and holds N.
        assert_eq!(PingPong::<u32>::current_index(10), 0);
        assert_eq!(*pp.current(10), 10);
        assert_eq!(*pp.previous(10), 9);
        assert_eq!(*pp.current(9), 9);
    }
}
