use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{IntervalMode, TimerState};

/// Every state change in the timer engine produces an Event.
/// Hosts collect the return values of engine commands or poll `snapshot()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: IntervalMode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// An interval finished, by natural expiry or skip. The engine has
    /// already moved to `next_mode`; `auto_started` says whether the
    /// auto-start policy re-entered Running or left the engine Idle.
    IntervalCompleted {
        mode: IntervalMode,
        next_mode: IntervalMode,
        next_duration_secs: u64,
        auto_started: bool,
        task_id: Option<String>,
        at: DateTime<Utc>,
    },
    /// The task association changed and the engine reset to a fresh Focus
    /// interval.
    TimerReset {
        task_id: Option<String>,
        at: DateTime<Utc>,
    },
    /// The user explicitly marked the attached task complete.
    TaskCompleted {
        task_id: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: IntervalMode,
        remaining_secs: u64,
        total_secs: u64,
        task_id: Option<String>,
        at: DateTime<Utc>,
    },
}
