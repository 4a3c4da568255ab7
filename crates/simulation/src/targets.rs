//! Descriptions of the off-screen grids the pipeline renders into, and the
//! capability check run against the device before anything is allocated.

use bevy::prelude::Resource;

use crate::config::{MAP_HEIGHT_IN_PIXELS, MAP_HEIGHT_IN_TILES, MAP_WIDTH_IN_PIXELS, MAP_WIDTH_IN_TILES};
use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// Four 32-bit float lanes.
    Rgba32Float,
    /// Four 8-bit normalized lanes, sRGB.
    Rgba8Srgb,
}

impl TargetFormat {
    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, TargetFormat::Rgba32Float)
    }

    #[inline]
    pub fn bytes_per_texel(self) -> usize {
        match self {
            TargetFormat::Rgba32Float => 16,
            TargetFormat::Rgba8Srgb => 4,
        }
    }
}

/// Size, addressing, filtering and format of one off-screen target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub label: &'static str,
    pub width: usize,
    pub height: usize,
    pub wrap: WrapMode,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub format: TargetFormat,
}

impl TargetDescriptor {
    pub fn byte_len(&self) -> usize {
        self.width * self.height * self.format.bytes_per_texel()
    }

    /// Tile index lookup table: one float texel per map cell, sampled exactly.
    pub fn tile_index() -> Self {
        Self {
            label: "tile_index",
            width: MAP_WIDTH_IN_TILES,
            height: MAP_HEIGHT_IN_TILES,
            wrap: WrapMode::Clamp,
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Nearest,
            format: TargetFormat::Rgba32Float,
        }
    }

    /// Flat terrain color map, one pixel per tile texel.
    pub fn terrain_color() -> Self {
        Self {
            label: "terrain_color",
            width: MAP_WIDTH_IN_PIXELS,
            height: MAP_HEIGHT_IN_PIXELS,
            wrap: WrapMode::Clamp,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Nearest,
            format: TargetFormat::Rgba8Srgb,
        }
    }

    /// Displacement, velocity, transfer and smoothed grids.
    pub fn water_state(size: usize, label: &'static str) -> Self {
        Self {
            label,
            width: size,
            height: size,
            wrap: WrapMode::Repeat,
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Nearest,
            format: TargetFormat::Rgba32Float,
        }
    }

    pub fn water_color(size: usize) -> Self {
        Self {
            label: "water_color",
            width: size,
            height: size,
            wrap: WrapMode::Repeat,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            format: TargetFormat::Rgba8Srgb,
        }
    }
}

/// What the execution environment can provide.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// 32-bit float textures can be created and sampled.
    pub float_textures: bool,
    /// 32-bit float textures can be sampled with linear filtering.
    pub float_linear_filtering: bool,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            float_textures: true,
            float_linear_filtering: false,
        }
    }
}

/// Fail if `desc` asks for something `caps` cannot provide.
pub fn check_target(desc: &TargetDescriptor, caps: &DeviceCapabilities) -> Result<(), SetupError> {
    if desc.width == 0 || desc.height == 0 {
        return Err(SetupError::InvalidConfig(format!(
            "target {} has zero size ({}x{})",
            desc.label, desc.width, desc.height
        )));
    }
    if desc.format.is_float() {
        if !caps.float_textures {
            return Err(SetupError::UnsupportedTargetFormat(format!(
                "{} needs 32-bit float textures",
                desc.label
            )));
        }
        let linear = desc.min_filter == FilterMode::Linear || desc.mag_filter == FilterMode::Linear;
        if linear && !caps.float_linear_filtering {
            return Err(SetupError::UnsupportedTargetFormat(format!(
                "{} needs linear filtering of float textures",
                desc.label
            )));
        }
    }
    Ok(())
}

/// Every target the pipeline allocates for a water grid of `water_size`.
pub fn pipeline_targets(water_size: usize) -> Vec<TargetDescriptor> {
    vec![
        TargetDescriptor::tile_index(),
        TargetDescriptor::terrain_color(),
        TargetDescriptor::water_state(water_size, "water_displacement"),
        TargetDescriptor::water_state(water_size, "water_velocity"),
        TargetDescriptor::water_state(water_size, "water_transfer"),
        TargetDescriptor::water_state(water_size, "water_smoothed"),
        TargetDescriptor::water_state(water_size, "water_normals"),
        TargetDescriptor::water_color(water_size),
    ]
}

/// Check every pipeline target, stopping at the first failure.
pub fn check_pipeline(water_size: usize, caps: &DeviceCapabilities) -> Result<(), SetupError> {
    pipeline_targets(water_size)
        .iter()
        .try_for_each(|desc| check_target(desc, caps))
}
