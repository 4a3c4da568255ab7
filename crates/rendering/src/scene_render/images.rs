use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use simulation::targets::{FilterMode, TargetDescriptor, TargetFormat, WrapMode};
use simulation::terrain_color::{TerrainColorMap, TileSheet};
use simulation::voxel::MeshBuffers;

/// Gray shown on the terrain until the tile sheet is ready.
const BLANK_TERRAIN_RGBA: [u8; 4] = [96, 96, 96, 255];

pub fn texture_format(format: TargetFormat) -> TextureFormat {
    match format {
        TargetFormat::Rgba32Float => TextureFormat::Rgba32Float,
        TargetFormat::Rgba8Srgb => TextureFormat::Rgba8UnormSrgb,
    }
}

pub fn sampler_for(desc: &TargetDescriptor) -> ImageSampler {
    let address = match desc.wrap {
        WrapMode::Clamp => ImageAddressMode::ClampToEdge,
        WrapMode::Repeat => ImageAddressMode::Repeat,
    };
    let filter = |f: FilterMode| match f {
        FilterMode::Nearest => ImageFilterMode::Nearest,
        FilterMode::Linear => ImageFilterMode::Linear,
    };
    ImageSampler::Descriptor(ImageSamplerDescriptor {
        label: Some(desc.label.to_string()),
        address_mode_u: address,
        address_mode_v: address,
        mag_filter: filter(desc.mag_filter),
        min_filter: filter(desc.min_filter),
        ..default()
    })
}

/// Image for an off-screen target, initialised with `data`. Returns `None`
/// if `data` does not fill the target exactly.
pub fn image_for_target(desc: &TargetDescriptor, data: Vec<u8>) -> Option<Image> {
    if data.len() != desc.byte_len() {
        warn!(
            "{}: expected {} bytes, got {}",
            desc.label,
            desc.byte_len(),
            data.len()
        );
        return None;
    }
    let mut image = Image::new(
        Extent3d {
            width: desc.width as u32,
            height: desc.height as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        texture_format(desc.format),
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = sampler_for(desc);
    Some(image)
}

pub fn terrain_color_image(map: &TerrainColorMap) -> Option<Image> {
    let desc = TargetDescriptor {
        width: map.width,
        height: map.height,
        ..TargetDescriptor::terrain_color()
    };
    image_for_target(&desc, map.data.clone())
}

pub fn blank_terrain_color_image() -> Option<Image> {
    let desc = TargetDescriptor::terrain_color();
    image_for_target(&desc, BLANK_TERRAIN_RGBA.repeat(desc.width * desc.height))
}

/// Read a loaded sheet image as 8-bit RGBA, converting other formats.
pub fn tile_sheet_from_image(image: &Image) -> Option<TileSheet> {
    let converted;
    let rgba = match image.texture_descriptor.format {
        TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm => image,
        _ => {
            converted = image.convert(TextureFormat::Rgba8UnormSrgb)?;
            &converted
        }
    };
    let size = rgba.size();
    TileSheet::from_rgba8(size.x as usize, size.y as usize, rgba.data.clone()).ok()
}

pub fn mesh_from_buffers(buffers: &MeshBuffers) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, buffers.positions.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, buffers.normals.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, buffers.uvs.clone())
    .with_inserted_indices(Indices::U32(buffers.indices.clone()))
}
