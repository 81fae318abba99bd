use crate::scheduler::TickScheduler;
use crate::state_machine::Action;
use pomod_core::theme::Theme;

/// Three text fields and a background theme.
pub trait DisplaySurface {
    fn set_clock_text(&mut self, text: &str);
    fn set_status_text(&mut self, text: &str);
    fn set_timer_text(&mut self, text: &str);
    /// The surface may ignore this when it cannot show colour.
    fn set_background_theme(&mut self, theme: Theme);
    fn supports_color(&self) -> bool;
}

pub trait Haptics {
    /// Fire-and-forget short vibration.
    fn pulse_short(&mut self);
}

/// Perform the phase timer's actions in order.
pub fn apply_actions<S>(actions: Vec<Action>, surface: &mut S, scheduler: &mut TickScheduler)
where
    S: DisplaySurface + Haptics,
{
    for action in actions {
        match action {
            Action::SetStatus(text) => surface.set_status_text(&text),
            Action::SetTimer(text) => surface.set_timer_text(&text),
            Action::SetTheme(theme) => surface.set_background_theme(theme),
            Action::Pulse => surface.pulse_short(),
            Action::ArmTick { token, after } => scheduler.arm(token, after),
        }
    }
}
