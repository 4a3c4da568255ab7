use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;

use simulation::settings::TidewaterConfig;

/// Env var: when set, save one screenshot to this path and exit.
const SCREENSHOT_ENV: &str = "TIDEWATER_SCREENSHOT";
/// Frames to let the sheet load and the water settle before the shot.
const SCREENSHOT_FRAME: u32 = 240;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Tidewater".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.53, 0.68, 0.85)))
    .insert_resource(TidewaterConfig::from_env())
    .add_plugins((simulation::SimulationPlugin, rendering::RenderingPlugin));

    // Screenshot mode: takes one shot of the default view and exits
    if let Ok(path) = std::env::var(SCREENSHOT_ENV) {
        app.insert_resource(ScreenshotRequest { frame: 0, path })
            .add_systems(Update, drive_screenshot);
    }

    app.run();
}

#[derive(Resource)]
struct ScreenshotRequest {
    frame: u32,
    path: String,
}

fn drive_screenshot(
    mut commands: Commands,
    mut request: ResMut<ScreenshotRequest>,
    mut exit: EventWriter<AppExit>,
) {
    request.frame += 1;
    if request.frame == SCREENSHOT_FRAME {
        info!("saving screenshot to {}", request.path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(request.path.clone()));
    } else if request.frame > SCREENSHOT_FRAME + 10 {
        // A few frames for the capture to reach disk.
        exit.send(AppExit::Success);
    }
}
