use bevy::prelude::*;

use crate::config::{GameConfig, PlayerConfig};
use crate::level::{screen_to_world, SceneSprite};
use crate::shared::*;
use super::animation::{AnimationTable, FolderImporter, FrameSource};
pub use super::controller::PlayerSetupError;
use super::Player;

/// Z for the player sprite so it draws above the ground.
const PLAYER_Z: f32 = 10.0;

/// Import animations and build the player state machine.
pub fn build_player<S>(config: &PlayerConfig, source: &mut S) -> Result<Player, PlayerSetupError>
where
    S: FrameSource<Frame = Handle<Image>>,
{
    let animations = AnimationTable::load(source)?;
    info!(
        "[Player] Loaded {} animation frames across {} statuses",
        animations.total_frames(),
        Status::all().count()
    );
    Player::new(config, animations)
}

/// Runs once on `OnEnter(GameState::Loading)`. A missing or empty
/// animation folder aborts startup instead of drawing a blank player.
pub fn spawn_player(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    existing: Query<Entity, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    // Guard: don't double-spawn if Loading is ever re-entered.
    if !existing.is_empty() {
        next_state.set(GameState::Playing);
        return;
    }

    let mut importer = FolderImporter::new(&asset_server, &config.assets);
    let player = match build_player(&config.player, &mut importer) {
        Ok(player) => player,
        Err(err) => {
            error!("[Player] Cannot start: {err}");
            exit.send(AppExit::error());
            return;
        }
    };

    let window_size = Vec2::new(config.window.width, config.window.height);
    let world = screen_to_world(player.rect().center(), window_size);

    commands.spawn((
        Sprite::from_image(player.image().clone()),
        Transform::from_translation(world.extend(PLAYER_Z)),
        player,
    ));

    info!("[Player] Spawned at {:?}", config.player.start_position);
    next_state.set(GameState::Playing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::animation::AnimationError;
    use std::path::PathBuf;

    struct HandleSource {
        empty: Option<&'static str>,
    }

    impl FrameSource for HandleSource {
        type Frame = Handle<Image>;

        fn folder_path(&self, status_key: &str) -> PathBuf {
            PathBuf::from("graphics/character").join(status_key)
        }

        fn import_folder(&mut self, status_key: &str) -> Result<Vec<Handle<Image>>, AnimationError> {
            if self.empty == Some(status_key) {
                return Ok(Vec::new());
            }
            Ok(vec![Handle::default(); 2])
        }
    }

    #[test]
    fn test_build_player_from_complete_source() {
        let player = build_player(&PlayerConfig::default(), &mut HandleSource { empty: None }).unwrap();
        assert_eq!(player.status, Status::idle(Facing::Down));
        assert_eq!(player.animations().total_frames(), 40);
    }

    #[test]
    fn test_build_player_missing_status_names_it() {
        let err = build_player(
            &PlayerConfig::default(),
            &mut HandleSource { empty: Some("up_water") },
        )
        .unwrap_err();
        assert!(matches!(err, PlayerSetupError::Animation(_)));
        let message = err.to_string();
        assert!(message.contains("up_water"), "got {message}");
    }

    #[test]
    fn test_build_player_rejects_bad_config() {
        let config = PlayerConfig {
            fps_index: 0.0,
            ..PlayerConfig::default()
        };
        let err = build_player(&config, &mut HandleSource { empty: None }).unwrap_err();
        assert!(matches!(err, PlayerSetupError::Config(_)));
    }
}
