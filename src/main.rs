use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use ikun_valley::config::{config_path, log_config, GameConfig};
use ikun_valley::shared::*;
use ikun_valley::{input, level, player};

fn main() -> AppExit {
    // Logging is not up until the app is built, so a bad config is
    // reported on stderr.
    let config = match GameConfig::load_or_default(config_path()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ikun-valley: {err}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window.title.clone(),
                        resolution: WindowResolution::new(config.window.width, config.window.height),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: config.assets.root.clone(),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // The level is cleared to black every frame
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        // Game state
        .init_state::<GameState>()
        // Events
        .add_event::<ToolUsedEvent>()
        .add_event::<SeedUsedEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(level::LevelPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_systems(Startup, log_config)
        .run()
}
