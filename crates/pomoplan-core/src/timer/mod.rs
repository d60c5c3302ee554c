mod engine;
mod hooks;
mod settings;

pub use engine::{TimerEngine, TimerState};
pub use hooks::{NoopHooks, TimerHooks};
pub use settings::{IntervalMode, TimerSettings};
