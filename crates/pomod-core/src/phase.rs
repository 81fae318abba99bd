use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Length of a work phase. Fixed, not configurable.
pub const WORK_MINUTES: u32 = 25;
/// Length of a break phase. Fixed, not configurable.
pub const BREAK_MINUTES: u32 = 5;

/// Status text shown before the first button press.
pub const READY_STATUS: &str = "Ready!";

/// The two alternating Pomodoro intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Work,
    Break,
}

impl Phase {
    pub fn duration_minutes(self) -> u32 {
        match self {
            Phase::Work => WORK_MINUTES,
            Phase::Break => BREAK_MINUTES,
        }
    }

    /// Status shown while this phase counts down.
    pub fn running_status(self) -> &'static str {
        match self {
            Phase::Work => "Work...",
            Phase::Break => "Break...",
        }
    }

    /// Status shown when this phase ends. Names the phase about to begin.
    pub fn announcement(self) -> &'static str {
        match self {
            Phase::Work => "Break Time!",
            Phase::Break => "Work Time!",
        }
    }

    pub fn next(self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Phase::Work => Theme::Red,
            Phase::Break => Theme::Green,
        }
    }
}

/// Countdown text for the timer field, e.g. `"25 min."`.
pub fn timer_text(minutes: u32) -> String {
    format!("{} min.", minutes)
}
