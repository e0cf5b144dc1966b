use bevy::input::InputSystem;
use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<PlayerInput>()
            .add_systems(PreUpdate, read_player_input.after(InputSystem))
            .add_systems(Update, handle_quit.in_set(FrameSet::Input));
    }
}

/// Physical key for every logical action.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub use_tool: KeyCode,
    pub switch_tool: KeyCode,
    pub use_seed: KeyCode,
    pub switch_seed: KeyCode,
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::ArrowUp,
            move_down: KeyCode::ArrowDown,
            move_left: KeyCode::ArrowLeft,
            move_right: KeyCode::ArrowRight,
            use_tool: KeyCode::Space,
            switch_tool: KeyCode::KeyQ,
            use_seed: KeyCode::ControlLeft,
            switch_seed: KeyCode::KeyE,
            quit: KeyCode::Escape,
        }
    }
}

/// Map held keys to logical actions. Everything is level-triggered:
/// holding an action key repeats it whenever its cooldown allows.
pub fn map_keys(keys: &ButtonInput<KeyCode>, bindings: &KeyBindings) -> PlayerInput {
    PlayerInput {
        up: keys.pressed(bindings.move_up),
        down: keys.pressed(bindings.move_down),
        left: keys.pressed(bindings.move_left),
        right: keys.pressed(bindings.move_right),
        use_tool: keys.pressed(bindings.use_tool),
        switch_tool: keys.pressed(bindings.switch_tool),
        use_seed: keys.pressed(bindings.use_seed),
        switch_seed: keys.pressed(bindings.switch_seed),
        quit: keys.pressed(bindings.quit),
    }
}

/// The single point where hardware input becomes game actions.
fn read_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut input: ResMut<PlayerInput>,
) {
    let mapped = map_keys(&keys, &bindings);
    if *input != mapped {
        *input = mapped;
    }
}

/// Quit key ends the app; closing the window is handled by Bevy.
fn handle_quit(input: Res<PlayerInput>, mut exit: EventWriter<AppExit>) {
    if input.quit {
        info!("[Input] Quit requested");
        exit.send(AppExit::Success);
    }
}
