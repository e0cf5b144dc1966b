//! The level: camera, frame ordering, and presentation of scene sprites.
//!
//! Gameplay objects live in screen space (origin top-left, y down, one
//! unit per logical pixel). Presentation converts their bounding-box
//! centre into Bevy world space, where the camera sits at the window
//! centre and y points up.

use bevy::prelude::*;
use bevy::time::Real;
use std::time::Duration;

use crate::config::GameConfig;
use crate::shared::*;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (FrameSet::Input, FrameSet::Simulate, FrameSet::Present).chain(),
        );
        app.add_systems(Startup, setup_camera);
    }
}

/// Timing handed to scene objects once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Wall-clock seconds since the previous frame, uncapped.
    pub dt: f32,
    /// Wall time since startup, for cooldowns.
    pub now: Duration,
}

impl FrameTick {
    /// Both fields come from the real clock so movement and cooldowns agree.
    pub fn from_time(real_time: &Time<Real>) -> Self {
        Self {
            dt: real_time.delta_secs(),
            now: real_time.elapsed(),
        }
    }
}

/// Something the level can update once per frame and then draw.
pub trait SceneSprite {
    type Frame;
    type Effect;

    fn update(&mut self, tick: FrameTick, input: &PlayerInput) -> Vec<Self::Effect>;

    /// Image to draw this frame.
    fn image(&self) -> &Self::Frame;

    /// Bounding box in screen space.
    fn rect(&self) -> Rect;
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Screen space (top-left origin, y down) to world space (centre origin, y up).
pub fn screen_to_world(screen: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        screen.x - window_size.x * 0.5,
        window_size.y * 0.5 - screen.y,
    )
}

/// Copy each scene sprite's current frame and position into its
/// `Sprite` and `Transform`. Z is left alone.
pub fn sync_scene_sprite<T>(
    config: Res<GameConfig>,
    mut query: Query<(&T, &mut Sprite, &mut Transform)>,
) where
    T: SceneSprite<Frame = Handle<Image>> + Component,
{
    let window_size = Vec2::new(config.window.width, config.window.height);
    for (object, mut sprite, mut transform) in query.iter_mut() {
        if sprite.image != *object.image() {
            sprite.image = object.image().clone();
        }
        let world = screen_to_world(object.rect().center(), window_size);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_centre_is_world_origin() {
        let size = Vec2::new(1280.0, 720.0);
        assert_eq!(screen_to_world(Vec2::new(640.0, 360.0), size), Vec2::ZERO);
    }

    #[test]
    fn test_screen_y_down_is_world_y_up() {
        let size = Vec2::new(1280.0, 720.0);
        assert_eq!(screen_to_world(Vec2::new(0.0, 0.0), size), Vec2::new(-640.0, 360.0));
        assert_eq!(screen_to_world(Vec2::new(1280.0, 720.0), size), Vec2::new(640.0, -360.0));
    }
}
