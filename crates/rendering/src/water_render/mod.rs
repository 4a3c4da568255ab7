//! Water on screen: a finely tessellated lid mesh at y = 0, displaced by the
//! smoothed height grid, textured with the lit surface color the engine
//! computes each frame.
//!
//! The color grid already carries refraction and lighting, so the lid
//! material is unlit.

mod systems;
mod upload;

pub use systems::{spawn_water_lid, upload_water, WaterImages, WaterLid};
pub use upload::{color_bytes, displace_lid};
