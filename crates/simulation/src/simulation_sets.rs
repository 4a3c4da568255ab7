//! Ordering contract for the terrain and water systems.
//!
//! Plugins from every crate place their systems into these sets so the order
//! between simulation and rendering is explicit rather than left to the
//! scheduler.
//!
//! # Startup phases (`StartupSet`)
//!
//! ```text
//! Detect  →  Build  →  Spawn
//! ```
//!
//! * **Detect** – Query the render device and record what it can sample.
//! * **Build** – Resolve the palette, bake the tile index, extrude the voxel
//!   mesh and allocate the water grids. Setup errors stop the app here.
//! * **Spawn** – Turn the baked data into images, meshes and entities.
//!
//! # Update phases (`FrameSet`)
//!
//! ```text
//! Clock  →  Simulation  →  Upload  →  Display
//! ```
//!
//! * **Clock** – Frame counter and elapsed-time bookkeeping.
//! * **Simulation** – Fixed-timestep water ticks and the per-frame derived
//!   passes.
//! * **Upload** – Copy CPU grids into GPU images and displace the water lid.
//! * **Display** – Window resize polling. Bevy's renderer submits the frame
//!   after `Update`.

use bevy::prelude::*;

/// Ordered phases for systems running in the `Startup` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StartupSet {
    Detect,
    Build,
    Spawn,
}

/// Ordered phases for systems running in the `Update` schedule, once per
/// displayed frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Clock,
    Simulation,
    Upload,
    Display,
}

pub(crate) fn configure_sets(app: &mut App) {
    app.configure_sets(
        Startup,
        (StartupSet::Detect, StartupSet::Build, StartupSet::Spawn).chain(),
    )
    .configure_sets(
        Update,
        (
            FrameSet::Clock,
            FrameSet::Simulation,
            FrameSet::Upload,
            FrameSet::Display,
        )
            .chain(),
    );
}
