use pomod_core::phase::{self, Phase};
use pomod_core::theme::Theme;
use std::time::Duration;
use tracing::debug;

/// Fixed countdown granularity.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Identifies one tick chain. A fresh token is issued on every `start()`,
/// so a tick armed by an earlier chain can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

/// Actions that the phase timer wants the caller to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the status text.
    SetStatus(String),
    /// Replace the timer text.
    SetTimer(String),
    /// Request a background theme.
    SetTheme(Theme),
    /// Fire a short haptic pulse.
    Pulse,
    /// Fire `on_tick(token)` once after `after` has elapsed, replacing any
    /// pending tick.
    ArmTick { token: TickToken, after: Duration },
}

/// The Work/Break countdown.
///
/// States are Idle-Work, Running-Work, Idle-Break, Running-Break. A button
/// press moves Idle-X (or Running-X) to Running-X with a fresh countdown; a
/// chain of one-minute ticks reaching zero moves Running-X to Idle-(next X).
#[derive(Debug)]
pub struct PhaseTimer {
    phase: Phase,
    /// Minutes left in the running phase. None while idle.
    remaining: Option<u32>,
    token: TickToken,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            remaining: None,
            token: TickToken(0),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_minutes(&self) -> Option<u32> {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Start (or restart) the countdown for the current phase.
    ///
    /// Pressing while already running restarts the count from the full
    /// duration; the previous tick chain is invalidated.
    pub fn start(&mut self) -> Vec<Action> {
        let minutes = self.phase.duration_minutes();
        if let Some(left) = self.remaining {
            debug!(phase = ?self.phase, left, "restarting running phase");
        }
        self.remaining = Some(minutes);
        self.token = TickToken(self.token.0.wrapping_add(1));
        debug!(phase = ?self.phase, minutes, "phase started");

        vec![
            Action::SetTheme(self.phase.theme()),
            Action::SetStatus(self.phase.running_status().to_string()),
            Action::SetTimer(phase::timer_text(minutes)),
            Action::ArmTick {
                token: self.token,
                after: TICK_INTERVAL,
            },
        ]
    }

    /// One minute of the current chain has elapsed.
    pub fn on_tick(&mut self, token: TickToken) -> Vec<Action> {
        if token != self.token {
            debug!(?token, current = ?self.token, "dropping stale tick");
            return Vec::new();
        }
        let Some(left) = self.remaining else {
            debug!("tick while idle, ignoring");
            return Vec::new();
        };

        let left = left.saturating_sub(1);
        if left > 0 {
            self.remaining = Some(left);
            return vec![
                Action::SetTimer(phase::timer_text(left)),
                Action::ArmTick {
                    token: self.token,
                    after: TICK_INTERVAL,
                },
            ];
        }

        let mut actions = vec![Action::SetTimer(String::new())];
        actions.extend(self.end_phase());
        actions
    }

    fn end_phase(&mut self) -> Vec<Action> {
        let ended = self.phase;
        self.phase = ended.next();
        self.remaining = None;
        debug!(ended = ?ended, next = ?self.phase, "phase ended");

        vec![
            Action::SetStatus(ended.announcement().to_string()),
            Action::SetTheme(Theme::White),
            Action::Pulse,
        ]
    }

    /// Token of the chain currently allowed to tick.
    #[cfg(test)]
    fn current_token(&self) -> TickToken {
        self.token
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}
