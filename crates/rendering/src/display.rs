//! Display resize polling. Bevy resizes the swapchain and camera projection
//! itself; this keeps the current size on hand and logs changes.

use bevy::prelude::*;
use bevy::window::WindowResized;

/// Logical size of the primary display surface.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
    /// Number of resizes seen since startup.
    pub resizes: u32,
}

pub fn poll_resize(mut events: EventReader<WindowResized>, mut size: ResMut<DisplaySize>) {
    // Only the latest size matters when several arrive in one frame.
    let Some(last) = events.read().last() else {
        return;
    };
    if last.width == size.width && last.height == size.height {
        return;
    }
    size.width = last.width;
    size.height = last.height;
    size.resizes += 1;
    info!("display resized to {}x{}", last.width, last.height);
}
