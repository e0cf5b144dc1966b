//! Player state machine.
//!
//! One `update` per frame runs, in order:
//!   1. update_timers — expired use-cooldowns report the tool/seed used
//!   2. input         — skipped entirely while the tool swing runs
//!   3. get_status    — idle when standing, tool key while swinging
//!   4. move_player   — normalised direction × speed × dt
//!   5. animate       — advance and wrap the frame index
//! Later steps read what earlier steps wrote.

use bevy::prelude::*;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ConfigError, PlayerConfig};
use crate::level::{FrameTick, SceneSprite};
use crate::shared::*;
use super::animation::{AnimationError, AnimationTable};
use super::timers::{PlayerTimers, TimerAction};

#[derive(Debug, Error)]
pub enum PlayerSetupError {
    #[error(transparent)]
    Animation(#[from] AnimationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Observable result of an expired use-cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEffect {
    ToolUsed(ToolKind),
    SeedUsed(SeedKind),
}

#[derive(Component, Debug, Clone)]
pub struct PlayerController<F: Send + Sync + 'static> {
    /// Centre of the bounding box, screen space (y grows downward).
    pub position: Vec2,
    /// Movement intent; each axis is -1, 0 or 1 until normalised.
    pub direction: Vec2,
    pub speed: f32,
    pub status: Status,
    /// Fractional index into the current status's frames.
    pub frame_index: f32,
    pub selected_tool: ToolKind,
    pub selected_seed: SeedKind,
    pub timers: PlayerTimers,
    fps_index: f32,
    frame_size: Vec2,
    tools: Vec<ToolKind>,
    tool_index: usize,
    seeds: Vec<SeedKind>,
    seed_index: usize,
    animations: AnimationTable<F>,
    image: F,
}

impl<F: Clone + Send + Sync + 'static> PlayerController<F> {
    pub fn new(config: &PlayerConfig, animations: AnimationTable<F>) -> Result<Self, PlayerSetupError> {
        config.validate()?;

        let status = Status::idle(Facing::Down);
        let image = animations.first_frame(status)?.clone();

        Ok(Self {
            position: config.start_position(),
            direction: Vec2::ZERO,
            speed: config.speed,
            status,
            frame_index: 0.0,
            selected_tool: config.tools[0],
            selected_seed: config.seeds[0],
            timers: PlayerTimers::from_config(&config.timers),
            fps_index: config.fps_index,
            frame_size: config.frame_size(),
            tools: config.tools.clone(),
            tool_index: 0,
            seeds: config.seeds.clone(),
            seed_index: 0,
            animations,
            image,
        })
    }

    pub fn update(&mut self, tick: FrameTick, input: &PlayerInput) -> Vec<PlayerEffect> {
        let effects = self.update_timers(tick.now);
        self.input(input, tick.now);
        self.get_status();
        self.move_player(tick.dt);
        self.animate(tick.dt);
        effects
    }

    fn update_timers(&mut self, now: Duration) -> Vec<PlayerEffect> {
        self.timers
            .update(now)
            .into_iter()
            .map(|action| match action {
                TimerAction::UseTool => self.use_tool(),
                TimerAction::UseSeed => self.use_seed(),
            })
            .collect()
    }

    fn use_tool(&self) -> PlayerEffect {
        PlayerEffect::ToolUsed(self.selected_tool)
    }

    fn use_seed(&self) -> PlayerEffect {
        PlayerEffect::SeedUsed(self.selected_seed)
    }

    fn input(&mut self, input: &PlayerInput, now: Duration) {
        // A running swing freezes movement and every action key.
        if self.timers.tool_use.is_active() {
            return;
        }

        // Vertical
        if input.up && !input.down {
            self.direction.y = -1.0;
            self.status = Status::walking(Facing::Up);
        } else if input.down && !input.up {
            self.direction.y = 1.0;
            self.status = Status::walking(Facing::Down);
        } else {
            self.direction.y = 0.0;
        }

        // Horizontal
        if input.left && !input.right {
            self.direction.x = -1.0;
            self.status = Status::walking(Facing::Left);
        } else if input.right && !input.left {
            self.direction.x = 1.0;
            self.status = Status::walking(Facing::Right);
        } else {
            self.direction.x = 0.0;
        }

        if input.use_tool {
            self.timers.tool_use.activate(now);
            self.direction = Vec2::ZERO;
            self.frame_index = 0.0;
        }

        if input.switch_tool && !self.timers.tool_switch.is_active() {
            self.timers.tool_switch.activate(now);
            self.tool_index = (self.tool_index + 1) % self.tools.len();
            self.selected_tool = self.tools[self.tool_index];
            debug!("[Player] Tool switched to {}", self.selected_tool);
        }

        if input.use_seed {
            self.timers.seed_use.activate(now);
            self.direction = Vec2::ZERO;
            self.frame_index = 0.0;
        }

        if input.switch_seed && !self.timers.seed_switch.is_active() {
            self.timers.seed_switch.activate(now);
            self.seed_index = (self.seed_index + 1) % self.seeds.len();
            self.selected_seed = self.seeds[self.seed_index];
            debug!("[Player] Seed switched to {}", self.selected_seed);
        }
    }

    /// Standing still means idle; a running tool swing overrides either.
    pub fn get_status(&mut self) {
        let facing = self.status.facing;
        if self.direction == Vec2::ZERO {
            self.status = Status::idle(facing);
        }
        if self.timers.tool_use.is_active() {
            self.status = Status::tool(facing, self.selected_tool);
        }
    }

    pub fn move_player(&mut self, dt: f32) {
        if self.direction != Vec2::ZERO {
            self.direction = self.direction.normalize();
        }
        self.position.x += self.direction.x * self.speed * dt;
        self.position.y += self.direction.y * self.speed * dt;
    }

    pub fn animate(&mut self, dt: f32) {
        let frames = self.animations.frames(self.status);
        self.frame_index += self.fps_index * dt;
        if self.frame_index >= frames.len() as f32 {
            self.frame_index = 0.0;
        }
        if let Some(frame) = frames.get(self.frame_index as usize) {
            self.image = frame.clone();
        }
    }

    pub fn tool_index(&self) -> usize {
        self.tool_index
    }

    pub fn seed_index(&self) -> usize {
        self.seed_index
    }

    pub fn animations(&self) -> &AnimationTable<F> {
        &self.animations
    }
}

impl<F: Clone + Send + Sync + 'static> SceneSprite for PlayerController<F> {
    type Frame = F;
    type Effect = PlayerEffect;

    fn update(&mut self, tick: FrameTick, input: &PlayerInput) -> Vec<PlayerEffect> {
        PlayerController::update(self, tick, input)
    }

    fn image(&self) -> &F {
        &self.image
    }

    fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.frame_size)
    }
}
