//! Per-frame clock shared by every updater in `FrameSet`.

use bevy::prelude::*;

/// Number of displayed frames since startup.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounter(pub u64);

/// Wall-clock timing of the current frame, in seconds.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameClock {
    pub delta: f32,
    pub elapsed: f32,
}

pub fn update_frame_clock(
    time: Res<Time>,
    mut clock: ResMut<FrameClock>,
    mut counter: ResMut<FrameCounter>,
) {
    clock.delta = time.delta_secs();
    clock.elapsed = time.elapsed_secs();
    counter.0 += 1;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    #[test]
    fn test_clock_tracks_manual_time() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<FrameClock>()
            .init_resource::<FrameCounter>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .add_systems(Update, update_frame_clock);

        // The first update only starts the clock.
        app.update();
        assert_eq!(app.world().resource::<FrameClock>().delta, 0.0);

        app.update();
        app.update();
        let clock = *app.world().resource::<FrameClock>();
        assert!((clock.delta - 0.05).abs() < 1e-6, "delta should be 0.05, got {}", clock.delta);
        assert!((clock.elapsed - 0.1).abs() < 1e-5);
        assert_eq!(app.world().resource::<FrameCounter>().0, 3);
    }
}
