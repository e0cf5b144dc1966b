//! Shared states, value types, resources, and events for Ikun Valley.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain's internals directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    /// Config applied, player animations being imported.
    #[default]
    Loading,
    Playing,
}

/// Per-frame ordering shared by every plugin. Chained in `LevelPlugin`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Keyboard state becomes `PlayerInput`.
    Input,
    /// Timers, movement and animation advance.
    Simulate,
    /// Scene sprites are copied into the renderer's components.
    Present,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Hoe,
    Axe,
    Water,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Hoe, ToolKind::Axe, ToolKind::Water];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Hoe => "hoe",
            ToolKind::Axe => "axe",
            ToolKind::Water => "water",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeedKind {
    #[default]
    Corn,
    Tomato,
}

impl SeedKind {
    pub const ALL: [SeedKind; 2] = [SeedKind::Corn, SeedKind::Tomato];

    pub fn as_str(self) -> &'static str {
        match self {
            SeedKind::Corn => "corn",
            SeedKind::Tomato => "tomato",
        }
    }
}

impl fmt::Display for SeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the player is doing while facing a direction.
///
/// Seed use has no activity of its own: planting never had animation
/// frames, so the sprite keeps whatever walk/idle state it was in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Activity {
    Walk,
    #[default]
    Idle,
    Tool(ToolKind),
}

/// Animation key: facing plus activity.
///
/// Renders as the asset directory name, e.g. `down`, `down_idle`,
/// `left_hoe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status {
    pub facing: Facing,
    pub activity: Activity,
}

impl Status {
    pub fn new(facing: Facing, activity: Activity) -> Self {
        Self { facing, activity }
    }

    pub fn walking(facing: Facing) -> Self {
        Self::new(facing, Activity::Walk)
    }

    pub fn idle(facing: Facing) -> Self {
        Self::new(facing, Activity::Idle)
    }

    pub fn tool(facing: Facing, tool: ToolKind) -> Self {
        Self::new(facing, Activity::Tool(tool))
    }

    /// Every status the player can reach: 4 facings × (walk, idle, each tool).
    pub fn all() -> impl Iterator<Item = Status> {
        Facing::ALL.into_iter().flat_map(|facing| {
            [Activity::Walk, Activity::Idle]
                .into_iter()
                .chain(ToolKind::ALL.into_iter().map(Activity::Tool))
                .map(move |activity| Status::new(facing, activity))
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.activity {
            Activity::Walk => write!(f, "{}", self.facing.as_str()),
            Activity::Idle => write!(f, "{}_idle", self.facing.as_str()),
            Activity::Tool(tool) => write!(f, "{}_{}", self.facing.as_str(), tool),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Logical key state for the current frame, filled by `InputPlugin`.
///
/// Gameplay code reads this instead of `ButtonInput<KeyCode>` so the
/// state machine never sees physical keys.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub use_tool: bool,
    pub switch_tool: bool,
    pub use_seed: bool,
    pub switch_seed: bool,
    pub quit: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Sent when the tool-use cooldown finishes with the tool that was swung.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ToolUsedEvent {
    pub tool: ToolKind,
    pub position: Vec2,
}

/// Sent when the seed-use cooldown finishes with the seed that was planted.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SeedUsedEvent {
    pub seed: SeedKind,
    pub position: Vec2,
}
