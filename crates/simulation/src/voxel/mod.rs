//! Voxel extrusion of the terrain.
//!
//! Each map cell becomes a column of unit cubes running from the cell's
//! scaled height down past a clip depth. All cubes are merged into one mesh
//! that is cut flat at the waterline, plus a flat lid mesh that carries the
//! water surface.

mod extrusion;
mod mesh;
#[cfg(test)]
mod tests;
mod types;

pub use extrusion::{build_cubes, column_tops};
pub use mesh::{build_lid_mesh, build_voxel_mesh};
pub use types::{CubeInstance, MeshBuffers, VoxelParams, VoxelStats};
