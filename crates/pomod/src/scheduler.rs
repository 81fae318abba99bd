use crate::state_machine::TickToken;
use std::time::{Duration, Instant};
use tracing::debug;

/// Holds the single outstanding "fire after one minute" request.
///
/// Arming replaces whatever was pending, so repeated button presses never
/// leave two tick chains alive.
#[derive(Debug, Default)]
pub struct TickScheduler {
    pending: Option<(Instant, TickToken)>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, token: TickToken, after: Duration) {
        self.arm_at(Instant::now() + after, token);
    }

    pub fn arm_at(&mut self, deadline: Instant, token: TickToken) {
        if let Some((_, stale)) = self.pending.replace((deadline, token)) {
            debug!(?stale, "cancelled pending tick");
        }
    }

    /// Return the `Instant` at which the pending tick fires, or `None` if
    /// nothing is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(deadline, _)| deadline)
    }

    /// Pop the pending tick if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<TickToken> {
        match self.pending {
            Some((deadline, token)) if deadline <= now => {
                self.pending = None;
                Some(token)
            }
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::{Action, PhaseTimer};

    fn tokens() -> (TickToken, TickToken) {
        let mut timer = PhaseTimer::new();
        let mut next = || {
            timer
                .start()
                .into_iter()
                .find_map(|a| match a {
                    Action::ArmTick { token, .. } => Some(token),
                    _ => None,
                })
                .unwrap()
        };
        (next(), next())
    }

    #[test]
    fn new_scheduler_has_no_deadline() {
        let sched = TickScheduler::new();
        assert!(sched.deadline().is_none());
        assert!(!sched.is_armed());
    }

    #[test]
    fn arm_sets_deadline_in_the_future() {
        let (token, _) = tokens();
        let mut sched = TickScheduler::new();
        let before = Instant::now();
        sched.arm(token, Duration::from_secs(60));
        let deadline = sched.deadline().unwrap();
        assert!(deadline >= before + Duration::from_secs(60));
    }

    #[test]
    fn not_due_before_deadline() {
        let (token, _) = tokens();
        let mut sched = TickScheduler::new();
        let now = Instant::now();
        sched.arm_at(now + Duration::from_secs(60), token);
        assert!(sched.take_due(now).is_none());
        assert!(sched.is_armed(), "an early check must not disarm");
    }

    #[test]
    fn due_tick_is_taken_once() {
        let (token, _) = tokens();
        let mut sched = TickScheduler::new();
        let now = Instant::now();
        sched.arm_at(now, token);
        assert_eq!(sched.take_due(now), Some(token));
        assert!(sched.take_due(now).is_none());
        assert!(sched.deadline().is_none());
    }

    #[test]
    fn rearming_replaces_pending_tick() {
        let (old, new) = tokens();
        let mut sched = TickScheduler::new();
        let now = Instant::now();
        sched.arm_at(now, old);
        sched.arm_at(now + Duration::from_secs(60), new);
        assert_eq!(sched.deadline(), Some(now + Duration::from_secs(60)));
        assert!(sched.take_due(now).is_none(), "stale tick must be gone");
        assert_eq!(sched.take_due(now + Duration::from_secs(60)), Some(new));
    }
}
