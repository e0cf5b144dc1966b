pub mod animation;
pub mod controller;
pub mod spawn;
pub mod timers;

use bevy::prelude::*;
use bevy::time::Real;

use crate::level::{sync_scene_sprite, FrameTick, SceneSprite};
use crate::shared::*;
use controller::{PlayerController, PlayerEffect};

/// The player as spawned in the game: frames are image handles.
pub type Player = PlayerController<Handle<Image>>;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), spawn::spawn_player);

        app.add_systems(
            Update,
            (
                update_player.in_set(FrameSet::Simulate),
                (report_tool_use, report_seed_use)
                    .after(update_player)
                    .in_set(FrameSet::Simulate),
                sync_scene_sprite::<Player>.in_set(FrameSet::Present),
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Advance every player one frame and publish what their cooldowns finished.
pub fn update_player(
    real_time: Res<Time<Real>>,
    input: Res<PlayerInput>,
    mut query: Query<&mut Player>,
    mut tool_events: EventWriter<ToolUsedEvent>,
    mut seed_events: EventWriter<SeedUsedEvent>,
) {
    let tick = FrameTick::from_time(&real_time);
    for mut player in query.iter_mut() {
        let effects = SceneSprite::update(&mut *player, tick, &input);
        for effect in effects {
            match effect {
                PlayerEffect::ToolUsed(tool) => {
                    tool_events.send(ToolUsedEvent {
                        tool,
                        position: player.position,
                    });
                }
                PlayerEffect::SeedUsed(seed) => {
                    seed_events.send(SeedUsedEvent {
                        seed,
                        position: player.position,
                    });
                }
            }
        }
    }
}

pub fn report_tool_use(mut events: EventReader<ToolUsedEvent>) {
    for ev in events.read() {
        info!("[Player] Used {} at ({:.1}, {:.1})", ev.tool, ev.position.x, ev.position.y);
    }
}

pub fn report_seed_use(mut events: EventReader<SeedUsedEvent>) {
    for ev in events.read() {
        info!("[Player] Planted {} at ({:.1}, {:.1})", ev.seed, ev.position.x, ev.position.y);
    }
}
