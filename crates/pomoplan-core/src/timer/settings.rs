use serde::{Deserialize, Serialize};

/// The kind of interval the timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalMode {
    Focus,
    ShortBreak,
    LongBreak,
}

/// Interval durations and auto-start policy.
///
/// Owned by the surrounding application and read-only to the engine; replace
/// it wholesale via [`super::TimerEngine::set_settings`] when the user edits
/// preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Focus interval length in minutes.
    pub pomodoro_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Start the break immediately when a focus interval finishes.
    pub auto_start_breaks: bool,
    /// Start the next focus interval immediately when a break finishes.
    pub auto_start_pomodoros: bool,
}

impl TimerSettings {
    /// Full duration of the given interval mode, in seconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_secs(&self, mode: IntervalMode) -> u64 {
        let minutes = match mode {
            IntervalMode::Focus => self.pomodoro_minutes,
            IntervalMode::ShortBreak => self.short_break_minutes,
            IntervalMode::LongBreak => self.long_break_minutes,
        };
        u64::from(minutes).saturating_mul(60)
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            pomodoro_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}
