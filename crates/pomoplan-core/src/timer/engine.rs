//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads - the caller invokes `tick()` once per second of wall-clock time
//! and the engine counts the current interval down.
//!
//! ## State Transitions
//!
//! ```text
//! Idle <-> Running <-> Paused
//!   ^        |
//!   +--------+  interval completion always lands in Idle first;
//!               the auto-start policy may immediately re-enter Running
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings);
//! engine.set_active_task(Some(&task));
//! engine.toggle(); // Running
//! // Once per second:
//! engine.tick();   // Returns Some(Event) when the interval completes
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hooks::{NoopHooks, TimerHooks};
use super::settings::{IntervalMode, TimerSettings};
use crate::events::Event;
use crate::task::Task;

/// Every fourth completed pomodoro earns the long break.
const POMODOROS_PER_CYCLE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Snapshot of the task the engine is attached to.
///
/// The engine owns `completed_pomodoros` for the lifetime of the
/// association: it increments the count exactly once per finished Focus
/// interval and reports the new value through
/// [`TimerHooks::on_pomodoro_complete`]. Callers store that value rather
/// than incrementing their own copy.
#[derive(Debug, Clone)]
struct ActiveTask {
    id: String,
    completed_pomodoros: u32,
}

/// Core timer engine.
///
/// Holds no state across process restarts; everything is reconstructed from
/// `(active_task, settings)` on association. All mutating operations take
/// `&mut self`, so a multi-threaded host must serialize them externally.
pub struct TimerEngine {
    settings: TimerSettings,
    state: TimerState,
    mode: IntervalMode,
    /// Remaining seconds in the current interval.
    /// Always within `0..=settings.duration_secs(mode)`.
    time_left_secs: u64,
    active_task: Option<ActiveTask>,
    hooks: Box<dyn TimerHooks>,
}

impl TimerEngine {
    /// Create a new engine in `Idle` with a fresh Focus interval primed.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            time_left_secs: settings.duration_secs(IntervalMode::Focus),
            settings,
            state: TimerState::Idle,
            mode: IntervalMode::Focus,
            active_task: None,
            hooks: Box::new(NoopHooks),
        }
    }

    /// Attach caller-supplied side effects (chime, completion callbacks).
    pub fn with_hooks(mut self, hooks: Box<dyn TimerHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> IntervalMode {
        self.mode
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.settings.duration_secs(self.mode)
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.active_task.as_ref().map(|t| t.id.as_str())
    }

    /// Completed pomodoro count for the attached task, as known to the
    /// engine (the authoritative value between associations).
    pub fn completed_pomodoros(&self) -> Option<u32> {
        self.active_task.as_ref().map(|t| t.completed_pomodoros)
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.time_left_secs as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            total_secs: self.total_secs(),
            task_id: self.active_task.as_ref().map(|t| t.id.clone()),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Associate the engine with a task, or detach with `None`.
    ///
    /// A change of task identity discards any in-progress interval and
    /// resets to a fresh Focus interval at full duration in `Idle`.
    /// Re-supplying the currently attached task is a no-op: field mutations
    /// on the caller's side do not reset the countdown.
    pub fn set_active_task(&mut self, task: Option<&Task>) -> Option<Event> {
        let same_identity = match (&self.active_task, task) {
            (Some(current), Some(new)) => current.id == new.id,
            (None, None) => true,
            _ => false,
        };
        if same_identity {
            return None;
        }

        self.active_task = task.map(|t| ActiveTask {
            id: t.id.clone(),
            completed_pomodoros: t.completed_pomodoros,
        });
        self.state = TimerState::Idle;
        self.mode = IntervalMode::Focus;
        self.time_left_secs = self.settings.duration_secs(IntervalMode::Focus);

        Some(Event::TimerReset {
            task_id: self.active_task.as_ref().map(|t| t.id.clone()),
            at: Utc::now(),
        })
    }

    /// Replace the engine's settings.
    ///
    /// Sitting idle in Focus mode, the countdown is re-primed to the new
    /// full pomodoro duration; otherwise the remaining time is clamped to
    /// the new interval cap so the countdown invariant holds without
    /// discarding an in-progress interval.
    pub fn set_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
        if self.state == TimerState::Idle && self.mode == IntervalMode::Focus {
            self.time_left_secs = self.settings.duration_secs(IntervalMode::Focus);
        } else {
            self.time_left_secs = self.time_left_secs.min(self.total_secs());
        }
    }

    /// Advance the countdown by one second of wall-clock time.
    ///
    /// Only acts while `Running` with a task attached; ticks in `Idle` or
    /// `Paused` are absorbed silently. Returns the completion event when the
    /// interval expires.
    pub fn tick(&mut self) -> Option<Event> {
        if self.active_task.is_none() || self.state != TimerState::Running {
            return None;
        }
        if self.time_left_secs <= 1 {
            Some(self.finish_interval())
        } else {
            self.time_left_secs -= 1;
            None
        }
    }

    /// Flip between running and not: `Running -> Paused`, otherwise
    /// `-> Running`. Leaves the countdown and mode untouched.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.active_task.is_none() {
            tracing::debug!("toggle with no attached task; ignoring");
            return None;
        }
        let event = match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Event::TimerPaused {
                    remaining_secs: self.time_left_secs,
                    at: Utc::now(),
                }
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                Event::TimerResumed {
                    remaining_secs: self.time_left_secs,
                    at: Utc::now(),
                }
            }
            TimerState::Idle => {
                self.state = TimerState::Running;
                Event::TimerStarted {
                    mode: self.mode,
                    duration_secs: self.total_secs(),
                    at: Utc::now(),
                }
            }
        };
        Some(event)
    }

    /// End the current interval immediately, exactly as if it had expired:
    /// same mode transition, same hooks, regardless of current state or
    /// remaining time.
    pub fn skip(&mut self) -> Option<Event> {
        if self.active_task.is_none() {
            tracing::debug!("skip with no attached task; ignoring");
            return None;
        }
        Some(self.finish_interval())
    }

    /// Explicit user action marking the attached task complete. Fires the
    /// task-completion hook only; interval state is untouched.
    pub fn mark_task_complete(&mut self) -> Option<Event> {
        let task_id = self.active_task.as_ref()?.id.clone();
        self.hooks.on_task_complete(&task_id);
        Some(Event::TaskCompleted {
            task_id,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Interval boundary: always passes through `Idle`, rings the chime,
    /// then applies the mode cycle and the auto-start policy.
    fn finish_interval(&mut self) -> Event {
        let finished = self.mode;
        self.state = TimerState::Idle;

        // Best effort; a missing audio device must never block a transition.
        let _ = self.hooks.play_chime();

        let next = match finished {
            IntervalMode::Focus => {
                // tick() and skip() guard attachment, so a finishing Focus
                // interval always has a task.
                let mut completed = 0;
                if let Some(task) = self.active_task.as_mut() {
                    task.completed_pomodoros += 1;
                    completed = task.completed_pomodoros;
                    let task_id = task.id.clone();
                    self.hooks.on_pomodoro_complete(&task_id, completed);
                }
                if completed % POMODOROS_PER_CYCLE == 0 {
                    IntervalMode::LongBreak
                } else {
                    IntervalMode::ShortBreak
                }
            }
            IntervalMode::ShortBreak | IntervalMode::LongBreak => IntervalMode::Focus,
        };

        self.mode = next;
        self.time_left_secs = self.settings.duration_secs(next);

        let auto_start = match next {
            IntervalMode::Focus => self.settings.auto_start_pomodoros,
            IntervalMode::ShortBreak | IntervalMode::LongBreak => self.settings.auto_start_breaks,
        };
        if auto_start {
            self.state = TimerState::Running;
        }

        Event::IntervalCompleted {
            mode: finished,
            next_mode: next,
            next_duration_secs: self.time_left_secs,
            auto_started: auto_start,
            task_id: self.active_task.as_ref().map(|t| t.id.clone()),
            at: Utc::now(),
        }
    }
}
