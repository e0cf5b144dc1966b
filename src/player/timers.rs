use std::fmt;
use std::time::Duration;

use crate::config::TimerConfig;

/// What the player does when a cooldown runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerAction {
    UseTool,
    UseSeed,
}

/// Wall-clock countdown polled once per frame.
///
/// `now` is the time since startup; the timer only stores when it was
/// started, so a long frame can never skip an expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownTimer {
    duration: Duration,
    start_time: Option<Duration>,
    active: bool,
    on_expire: Option<TimerAction>,
}

impl CooldownTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            start_time: None,
            active: false,
            on_expire: None,
        }
    }

    pub fn with_action(duration: Duration, action: TimerAction) -> Self {
        Self {
            on_expire: Some(action),
            ..Self::new(duration)
        }
    }

    /// Start (or restart) the countdown from `now`.
    pub fn activate(&mut self, now: Duration) {
        self.active = true;
        self.start_time = Some(now);
    }

    /// Stop without firing the expiry action.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.start_time = None;
    }

    /// Returns the expiry action on the one update where the timer runs out.
    pub fn update(&mut self, now: Duration) -> Option<TimerAction> {
        if !self.active {
            return None;
        }
        let start = self.start_time.unwrap_or(now);
        if now.saturating_sub(start) >= self.duration {
            self.deactivate();
            return self.on_expire;
        }
        None
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    ToolUse,
    ToolSwitch,
    SeedUse,
    SeedSwitch,
}

impl TimerKind {
    pub const ALL: [TimerKind; 4] = [
        TimerKind::ToolUse,
        TimerKind::ToolSwitch,
        TimerKind::SeedUse,
        TimerKind::SeedSwitch,
    ];
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerKind::ToolUse => "tool use",
            TimerKind::ToolSwitch => "tool switch",
            TimerKind::SeedUse => "seed use",
            TimerKind::SeedSwitch => "seed switch",
        })
    }
}

/// The player's four independent cooldowns.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTimers {
    pub tool_use: CooldownTimer,
    pub tool_switch: CooldownTimer,
    pub seed_use: CooldownTimer,
    pub seed_switch: CooldownTimer,
}

impl PlayerTimers {
    pub fn from_config(config: &TimerConfig) -> Self {
        Self {
            tool_use: CooldownTimer::with_action(config.tool_use(), TimerAction::UseTool),
            tool_switch: CooldownTimer::new(config.tool_switch()),
            seed_use: CooldownTimer::with_action(config.seed_use(), TimerAction::UseSeed),
            seed_switch: CooldownTimer::new(config.seed_switch()),
        }
    }

    pub fn get(&self, kind: TimerKind) -> &CooldownTimer {
        match kind {
            TimerKind::ToolUse => &self.tool_use,
            TimerKind::ToolSwitch => &self.tool_switch,
            TimerKind::SeedUse => &self.seed_use,
            TimerKind::SeedSwitch => &self.seed_switch,
        }
    }

    pub fn get_mut(&mut self, kind: TimerKind) -> &mut CooldownTimer {
        match kind {
            TimerKind::ToolUse => &mut self.tool_use,
            TimerKind::ToolSwitch => &mut self.tool_switch,
            TimerKind::SeedUse => &mut self.seed_use,
            TimerKind::SeedSwitch => &mut self.seed_switch,
        }
    }

    /// Tick every timer in declaration order, collecting fired actions.
    pub fn update(&mut self, now: Duration) -> Vec<TimerAction> {
        TimerKind::ALL
            .into_iter()
            .filter_map(|kind| self.get_mut(kind).update(now))
            .collect()
    }
}

impl Default for PlayerTimers {
    fn default() -> Self {
        Self::from_config(&TimerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_timer_is_inactive() {
        let mut timer = CooldownTimer::with_action(ms(350), TimerAction::UseTool);
        assert!(!timer.is_active());
        assert_eq!(timer.start_time(), None);
        assert_eq!(timer.update(ms(10_000)), None);
    }

    #[test]
    fn test_tool_use_fires_once_after_duration() {
        let mut timer = CooldownTimer::with_action(ms(350), TimerAction::UseTool);
        timer.activate(ms(0));

        assert_eq!(timer.update(ms(349)), None);
        assert!(timer.is_active());

        assert_eq!(timer.update(ms(351)), Some(TimerAction::UseTool));
        assert!(!timer.is_active());
        assert_eq!(timer.start_time(), None);

        // Already expired: nothing fires again.
        assert_eq!(timer.update(ms(500)), None);
    }

    #[test]
    fn test_expires_exactly_at_duration() {
        let mut timer = CooldownTimer::new(ms(200));
        timer.activate(ms(1_000));
        assert_eq!(timer.update(ms(1_200)), None);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_reactivate_restarts_countdown() {
        let mut timer = CooldownTimer::with_action(ms(350), TimerAction::UseSeed);
        timer.activate(ms(0));
        timer.activate(ms(300));

        assert_eq!(timer.update(ms(400)), None);
        assert!(timer.is_active());
        assert_eq!(timer.update(ms(650)), Some(TimerAction::UseSeed));
    }

    #[test]
    fn test_deactivate_does_not_fire() {
        let mut timer = CooldownTimer::with_action(ms(350), TimerAction::UseTool);
        timer.activate(ms(0));
        timer.deactivate();

        assert!(!timer.is_active());
        assert_eq!(timer.update(ms(1_000)), None);
    }

    #[test]
    fn test_player_timers_only_use_timers_fire_actions() {
        let mut timers = PlayerTimers::default();
        for kind in TimerKind::ALL {
            timers.get_mut(kind).activate(ms(0));
        }

        let fired = timers.update(ms(1_000));
        assert_eq!(fired, vec![TimerAction::UseTool, TimerAction::UseSeed]);
        assert!(TimerKind::ALL.iter().all(|k| !timers.get(*k).is_active()));
    }

    #[test]
    fn test_timer_kind_names() {
        let names: Vec<String> = TimerKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["tool use", "tool switch", "seed use", "seed switch"]);
    }
}
