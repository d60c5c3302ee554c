//! Task types shared between the timer engine and the planning surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::planner::ProposedTask;

/// A unit of work tracked in pomodoros.
///
/// Owned by the surrounding application. The timer engine reads the identity
/// and completed count at association time and reports increments back
/// through its hooks; it never mutates a `Task` directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at creation.
    pub id: String,
    pub title: String,
    /// Focus intervals finished for this task. Incremented only in response
    /// to the engine's pomodoro-completion signal.
    #[serde(default)]
    pub completed_pomodoros: u32,
    /// Planner estimate of focus intervals needed.
    #[serde(default)]
    pub expected_pomodoros: u32,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed_pomodoros: 0,
            expected_pomodoros: 0,
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_expected_pomodoros(mut self, expected: u32) -> Self {
        self.expected_pomodoros = expected;
        self
    }

    /// Materialize a planner proposal into a task with a fresh id.
    ///
    /// The proposal's duration is converted to an expected pomodoro count by
    /// rounding up to whole intervals of `pomodoro_minutes`.
    pub fn from_proposal(proposal: &ProposedTask, pomodoro_minutes: u32) -> Self {
        let expected = proposal.duration.div_ceil(pomodoro_minutes.max(1));
        Self {
            notes: proposal.notes.clone(),
            ..Self::new(proposal.title.clone()).with_expected_pomodoros(expected)
        }
    }
}
