use chrono::{Local, NaiveTime, Timelike};
use std::time::{Duration, Instant};

/// Wall-clock text for the clock field, e.g. `"09:05"` or `"9:05"`.
pub fn format_clock(time: NaiveTime, format_24h: bool) -> String {
    let fmt = if format_24h { "%H:%M" } else { "%-I:%M" };
    time.format(fmt).to_string()
}

/// Time left until the next wall-clock minute starts.
pub fn until_next_minute(time: NaiveTime) -> Duration {
    // Nanoseconds run past 1e9 during a leap second.
    let nanos = time.nanosecond().min(999_999_999);
    let into_minute = Duration::new(time.second() as u64, nanos);
    let left = Duration::from_secs(60).saturating_sub(into_minute);
    if left.is_zero() {
        Duration::from_secs(60)
    } else {
        left
    }
}

/// Supplies the formatted local time once per minute.
#[derive(Debug)]
pub struct ClockFormatter {
    format_24h: bool,
    next: Instant,
}

impl ClockFormatter {
    pub fn new(format_24h: bool) -> Self {
        Self {
            format_24h,
            next: Instant::now(),
        }
    }

    /// When the clock text next changes.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Format the current time and schedule the following minute.
    pub fn now_text(&mut self) -> String {
        let now = Local::now().time();
        self.next = Instant::now() + until_next_minute(now);
        format_clock(now, self.format_24h)
    }
}
