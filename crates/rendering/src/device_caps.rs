//! Query the render device for the float texture support the pipeline needs.

use bevy::prelude::*;
use bevy::render::render_resource::{TextureFormat, TextureSampleType, TextureUsages};
use bevy::render::renderer::{RenderAdapter, RenderDevice};
use bevy::render::settings::WgpuFeatures;

use simulation::targets::DeviceCapabilities;

/// Whether `Rgba32Float` can be sampled with linear filtering on a device
/// created with `features`.
pub fn float_filterable(features: WgpuFeatures) -> bool {
    matches!(
        TextureFormat::Rgba32Float.sample_type(None, Some(features)),
        Some(TextureSampleType::Float { filterable: true })
    )
}

/// Record what the device can do with `Rgba32Float`. Without a device
/// (headless runs) the defaults stay in place.
pub fn detect_device_capabilities(
    adapter: Option<Res<RenderAdapter>>,
    device: Option<Res<RenderDevice>>,
    mut caps: ResMut<DeviceCapabilities>,
) {
    let (Some(adapter), Some(device)) = (adapter, device) else {
        warn!("no render device; assuming float textures are available");
        return;
    };
    let usages = adapter
        .get_texture_format_features(TextureFormat::Rgba32Float)
        .allowed_usages;
    *caps = DeviceCapabilities {
        float_textures: usages.contains(TextureUsages::TEXTURE_BINDING),
        float_linear_filtering: float_filterable(device.features()),
    };
    info!(
        "device capabilities: float textures {}, float filtering {}",
        caps.float_textures, caps.float_linear_filtering
    );
}
