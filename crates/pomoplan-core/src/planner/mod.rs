//! Natural-language plan extraction.
//!
//! Turns a free-text description of upcoming work into a list of proposed
//! tasks by asking a hosted language model for a fixed-schema JSON response.
//! The client is stateless and best-effort: every failure mode collapses to
//! an empty extraction so callers can always render "no suggestions" instead
//! of an error state.

mod client;

use serde::{Deserialize, Serialize};

pub use client::PlanClient;

/// An unpersisted task suggestion returned by the extraction client.
///
/// Proposals carry no identity; the caller assigns ids when merging them
/// into its task list (see [`crate::Task::from_proposal`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedTask {
    pub title: String,
    /// Estimated duration in minutes.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Result of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanExtraction {
    /// Defaults to no tasks when the model response omits the field.
    #[serde(default)]
    pub tasks: Vec<ProposedTask>,
}

impl PlanExtraction {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tasks_field_defaults_to_empty() {
        let extraction: PlanExtraction = serde_json::from_str("{}").unwrap();
        assert!(extraction.tasks.is_empty());
    }

    #[test]
    fn parses_schema_conforming_payload() {
        let payload = r#"{
            "tasks": [
                {"title": "Draft outline", "duration": 25},
                {"title": "Email review", "duration": 15, "notes": "after lunch"}
            ]
        }"#;
        let extraction: PlanExtraction = serde_json::from_str(payload).unwrap();
        assert_eq!(extraction.tasks.len(), 2);
        assert_eq!(extraction.tasks[0].title, "Draft outline");
        assert_eq!(extraction.tasks[0].notes, None);
        assert_eq!(extraction.tasks[1].notes.as_deref(), Some("after lunch"));
    }
}
