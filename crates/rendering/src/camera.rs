use bevy::prelude::*;

/// Fixed viewing position of the default rig.
pub const CAMERA_POSITION: Vec3 = Vec3::new(-50.0, 50.0, -50.0);
/// The camera looks at the scene center, lowered by this much.
pub const LOOK_AT_DROP: f32 = 12.0;
/// Direction the sunlight comes from (points towards the light).
pub const SUN_DIRECTION: Vec3 = Vec3::new(-0.65, 1.0, -0.65);

/// Transform of the default camera for a scene centered at `center`.
pub fn camera_transform(center: Vec3) -> Transform {
    Transform::from_translation(CAMERA_POSITION)
        .looking_at(center - Vec3::Y * LOOK_AT_DROP, Vec3::Y)
}

/// Transform of a directional light shining from `from` towards the origin.
pub fn sun_transform(from: Vec3) -> Transform {
    Transform::from_translation(from.normalize_or(Vec3::Y)).looking_at(Vec3::ZERO, Vec3::Y)
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera3d::default(), camera_transform(Vec3::ZERO)));
}

pub fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        sun_transform(SUN_DIRECTION),
    ));
}
