use std::io::Write;
use std::thread;
use std::time::Duration;

use clap::Subcommand;
use pomoplan_core::timer::{IntervalMode, TimerEngine, TimerHooks, TimerState};
use pomoplan_core::{Config, Event, Task};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run focus/break intervals in the foreground, printing events as JSON lines
    Run {
        /// Title for the ad-hoc task driving this session
        #[arg(long, default_value = "Focus session")]
        title: String,
        /// Stop after this many completed focus intervals
        #[arg(long, default_value = "1")]
        pomodoros: u32,
    },
    /// Print the initial timer state for the current configuration as JSON
    Status,
}

/// Terminal-side hooks: ASCII bell as the chime, progress notes on stderr.
struct TerminalHooks {
    chime: bool,
}

impl TimerHooks for TerminalHooks {
    fn on_pomodoro_complete(&mut self, _task_id: &str, completed_pomodoros: u32) {
        eprintln!("pomodoro {completed_pomodoros} complete");
    }

    fn play_chime(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.chime {
            let mut out = std::io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        TimerAction::Status => {
            let engine = TimerEngine::new(config.timer_settings());
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Run { title, pomodoros } => {
            let mut engine = TimerEngine::new(config.timer_settings()).with_hooks(Box::new(
                TerminalHooks {
                    chime: config.notifications.chime,
                },
            ));
            let task = Task::new(title);
            if let Some(event) = engine.set_active_task(Some(&task)) {
                println!("{}", serde_json::to_string(&event)?);
            }

            let mut completed = 0u32;
            while completed < pomodoros {
                if engine.state() != TimerState::Running {
                    // The engine waits in Idle between intervals unless
                    // auto-start is on; here the CLI is the user and starts
                    // the next interval.
                    if let Some(event) = engine.toggle() {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                }
                thread::sleep(Duration::from_secs(1));
                if let Some(event) = engine.tick() {
                    if let Event::IntervalCompleted {
                        mode: IntervalMode::Focus,
                        ..
                    } = &event
                    {
                        completed += 1;
                    }
                    println!("{}", serde_json::to_string(&event)?);
                }
            }
        }
    }

    Ok(())
}
