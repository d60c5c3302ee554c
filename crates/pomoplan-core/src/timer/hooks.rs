/// Caller-supplied side effects for timer interval boundaries.
///
/// All methods default to no-ops, so hosts implement only what they need.
pub trait TimerHooks: Send {
    /// A Focus interval finished (natural expiry or skip) with a task
    /// attached. `completed_pomodoros` is the new authoritative count for
    /// the task -- store it, do not re-increment.
    fn on_pomodoro_complete(&mut self, _task_id: &str, _completed_pomodoros: u32) {}

    /// The user explicitly marked the attached task complete. Never fired by
    /// interval completion itself.
    fn on_task_complete(&mut self, _task_id: &str) {}

    /// Play the interval-completion chime. Best effort; the engine ignores
    /// failures.
    fn play_chime(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// Hooks implementation that does nothing.
#[derive(Debug, Default)]
pub struct NoopHooks;

impl TimerHooks for NoopHooks {}
