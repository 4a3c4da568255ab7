//! Fixed terrain elevation data.
//!
//! The built-in map is a 32x32 grid of byte samples authored row by row. Row 0
//! of the authored data is the far edge of the map, so consumers that walk the
//! map with `y` increasing towards the viewer read row `rows - 1 - y` (see
//! [`crate::index_bake`]).

use bevy::prelude::*;

use crate::config::{HEIGHT_SAMPLE_RANGE, MAP_HEIGHT_IN_TILES, MAP_WIDTH_IN_TILES};
use crate::error::SetupError;

#[rustfmt::skip]
const BUILTIN_HEIGHT_MAP: [[u8; MAP_WIDTH_IN_TILES]; MAP_HEIGHT_IN_TILES] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [35, 51, 56, 61, 74, 83, 90, 90, 90, 90, 90, 99, 111, 116, 116, 116, 116, 116, 116, 116, 116, 116, 114, 104, 80, 0, 0, 0, 0, 0, 0, 0],
    [87, 103, 108, 111, 111, 113, 113, 113, 113, 113, 113, 115, 121, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123, 120, 89, 0, 0, 0, 0, 0, 0, 0],
    [98, 108, 114, 115, 115, 113, 113, 113, 113, 113, 113, 115, 115, 116, 116, 116, 116, 116, 116, 116, 116, 116, 116, 111, 89, 0, 0, 0, 0, 0, 0, 0],
    [180, 169, 161, 150, 157, 166, 176, 176, 176, 176, 176, 185, 194, 200, 200, 200, 200, 200, 200, 200, 200, 200, 194, 173, 136, 0, 0, 0, 0, 0, 0, 0],
    [244, 253, 253, 252, 252, 252, 252, 252, 252, 252, 252, 252, 248, 248, 248, 249, 251, 251, 251, 248, 248, 248, 248, 240, 188, 0, 0, 0, 0, 0, 0, 0],
    [230, 244, 245, 244, 244, 244, 244, 244, 244, 244, 244, 244, 248, 248, 248, 249, 252, 254, 251, 248, 248, 248, 248, 240, 188, 0, 0, 0, 0, 0, 0, 0],
    [120, 138, 138, 136, 136, 136, 136, 136, 136, 136, 136, 158, 173, 184, 189, 201, 230, 230, 225, 200, 200, 194, 189, 169, 136, 0, 0, 0, 0, 0, 0, 0],
    [80, 110, 117, 118, 117, 117, 117, 117, 117, 117, 117, 117, 117, 117, 117, 116, 116, 116, 116, 116, 116, 116, 117, 111, 89, 0, 0, 0, 0, 0, 0, 0],
    [80, 117, 122, 122, 121, 121, 121, 121, 121, 121, 121, 121, 121, 121, 121, 123, 123, 123, 123, 123, 123, 123, 121, 120, 89, 0, 0, 0, 0, 0, 0, 0],
    [71, 100, 110, 111, 110, 110, 110, 110, 110, 110, 110, 110, 110, 110, 112, 114, 116, 116, 116, 116, 116, 114, 112, 100, 80, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 89, 111, 119, 117, 117, 117, 116, 116, 114, 112, 112, 114, 116, 116, 116, 116, 116, 116, 116, 116, 116, 116, 116, 116, 108, 89],
    [0, 0, 0, 0, 0, 0, 147, 130, 134, 128, 128, 128, 123, 123, 123, 128, 128, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123, 120],
    [0, 0, 0, 0, 0, 0, 187, 195, 172, 172, 163, 158, 153, 148, 148, 144, 144, 148, 148, 148, 148, 148, 148, 148, 148, 148, 148, 148, 148, 148, 166, 188],
    [0, 0, 0, 0, 0, 0, 218, 254, 255, 254, 254, 254, 254, 254, 245, 237, 237, 246, 255, 255, 255, 255, 254, 254, 255, 255, 255, 255, 255, 255, 255, 250],
    [0, 0, 0, 0, 0, 0, 180, 219, 232, 226, 217, 217, 212, 207, 200, 200, 200, 220, 224, 235, 227, 227, 216, 225, 231, 237, 240, 243, 245, 244, 240, 218],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [76, 96, 106, 109, 111, 109, 107, 105, 105, 105, 105, 102, 97, 91, 91, 91, 91, 91, 91, 98, 98, 104, 105, 105, 91, 60, 0, 0, 0, 0, 0, 0],
    [91, 112, 116, 118, 118, 118, 116, 116, 116, 116, 116, 116, 114, 114, 114, 114, 114, 114, 114, 116, 117, 116, 117, 117, 112, 85, 0, 0, 0, 0, 0, 0],
    [86, 106, 111, 111, 111, 111, 112, 112, 112, 112, 112, 112, 114, 114, 114, 114, 114, 114, 114, 116, 117, 116, 116, 116, 112, 85, 0, 0, 0, 0, 0, 0],
    [166, 197, 212, 222, 230, 222, 215, 208, 208, 208, 201, 183, 176, 168, 168, 168, 176, 176, 174, 160, 166, 168, 183, 183, 188, 174, 0, 0, 0, 0, 0, 0],
    [202, 244, 252, 252, 252, 252, 252, 252, 252, 252, 252, 248, 251, 253, 251, 250, 253, 253, 250, 252, 252, 255, 255, 255, 255, 188, 0, 0, 0, 0, 0, 0],
    [190, 230, 241, 244, 244, 244, 244, 244, 244, 244, 244, 248, 252, 253, 251, 250, 251, 252, 250, 244, 244, 241, 241, 241, 225, 188, 0, 0, 0, 0, 0, 0],];

/// Read-only grid of byte elevation samples, addressed by `(row, col)`.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct HeightField {
    samples: Vec<u8>,
    width: usize,
    height: usize,
}

impl Default for HeightField {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HeightField {
    /// The compiled-in 32x32 terrain.
    pub fn builtin() -> Self {
        let samples = BUILTIN_HEIGHT_MAP
            .iter()
            .flat_map(|row| row.iter().copied())
            .collect();
        Self {
            samples,
            width: MAP_WIDTH_IN_TILES,
            height: MAP_HEIGHT_IN_TILES,
        }
    }

    /// Build a height field from explicit rows. Every row must have the same
    /// length and there must be at least one row.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, SetupError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(SetupError::InvalidConfig(
                "height field must have at least one sample".to_string(),
            ));
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(SetupError::GridMismatch {
                what: "height field row",
                expected: (width, 1),
                found: (bad.len(), 1),
            });
        }
        Ok(Self {
            samples: rows.iter().flat_map(|r| r.iter().copied()).collect(),
            width,
            height,
        })
    }

    /// A field of `width` x `height` samples all set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            samples: vec![value; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw sample at `(row, col)`.
    #[inline]
    pub fn sample(&self, row: usize, col: usize) -> u8 {
        self.samples[row * self.width + col]
    }

    /// Overwrite one sample. Only used to build synthetic fields.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.samples[row * self.width + col] = value;
    }

    /// Sample at `(row, col)` scaled into `[0, 1)`.
    #[inline]
    pub fn normalized(&self, row: usize, col: usize) -> f32 {
        f32::from(self.sample(row, col)) / HEIGHT_SAMPLE_RANGE
    }

    /// Highest raw sample in the field.
    pub fn max_sample(&self) -> u8 {
        self.samples.iter().copied().max().unwrap_or(0)
    }
}
