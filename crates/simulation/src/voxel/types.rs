use bevy::prelude::*;

use crate::config::{MAP_HEIGHT_IN_3D_UNITS, MAP_WIDTH_IN_3D_UNITS};
use crate::settings::TerrainSettings;

/// Geometry parameters for the extrusion.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct VoxelParams {
    pub height_multiplier: f32,
    /// Height of one cube; also the world height of the clip plane.
    pub y_scale: f32,
    /// Columns stop once a cube top would fall below `-clip_plane_height`.
    pub clip_plane_height: f32,
    /// World extent of the whole map on X.
    pub world_width: f32,
    /// World extent of the whole map on Z.
    pub world_depth: f32,
}

impl VoxelParams {
    pub fn from_settings(settings: &TerrainSettings) -> Self {
        Self {
            height_multiplier: settings.height_multiplier,
            y_scale: settings.y_scale,
            clip_plane_height: settings.clip_plane_height,
            world_width: MAP_WIDTH_IN_3D_UNITS,
            world_depth: MAP_HEIGHT_IN_3D_UNITS,
        }
    }

    /// World height above which geometry is cut away.
    #[inline]
    pub fn clip_y(&self) -> f32 {
        self.y_scale
    }
}

impl Default for VoxelParams {
    fn default() -> Self {
        Self::from_settings(&TerrainSettings::default())
    }
}

/// One cube of a column: which map cell it belongs to and its top height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeInstance {
    pub cell_x: usize,
    pub cell_y: usize,
    pub top: f32,
}

/// Plain vertex/index buffers, ready to be turned into an engine mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a quad given corners in counter-clockwise order seen from the
    /// side `normal` points to.
    pub(crate) fn push_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3], uvs: [[f32; 2]; 4]) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 4]);
        self.uvs.extend_from_slice(&uvs);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Counters logged after the extrusion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoxelStats {
    pub cubes: usize,
    pub clipped: usize,
    pub dropped: usize,
    pub vertices: usize,
}
