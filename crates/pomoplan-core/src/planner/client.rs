use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::PlanExtraction;
use crate::error::PlanError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Client for the plan-extraction model endpoint.
///
/// Stateless between calls; each call makes a single attempt with no retry.
/// The credential is injected once at construction -- resolved by the host
/// at process start -- rather than looked up ambiently per call.
pub struct PlanClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl PlanClient {
    /// Create a client with an explicitly supplied credential.
    ///
    /// `None` (or an empty string) disables extraction: calls return an
    /// empty result without touching the network.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL (compatible proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Extract proposed tasks from a free-text plan description.
    ///
    /// `reference_time` anchors relative phrasing in the description
    /// ("tomorrow morning", "before my 3pm call").
    ///
    /// Never raises to its caller: a missing credential logs a warning, any
    /// request or parse failure logs an error, and both degrade to an empty
    /// extraction.
    pub async fn extract_tasks(
        &self,
        description: &str,
        reference_time: DateTime<Utc>,
    ) -> PlanExtraction {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("no planner credential configured; returning empty plan");
            return PlanExtraction::empty();
        };

        match self.request_plan(api_key, description, reference_time).await {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::error!(error = %e, "plan extraction failed");
                PlanExtraction::empty()
            }
        }
    }

    async fn request_plan(
        &self,
        api_key: &str,
        description: &str,
        reference_time: DateTime<Utc>,
    ) -> Result<PlanExtraction, PlanError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(description, reference_time) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlanError::Api { status, body });
        }

        let response: GenerateContentResponse = response.json().await?;
        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(PlanError::EmptyResponse)?;

        Ok(serde_json::from_str(text)?)
    }
}

fn build_prompt(description: &str, reference_time: DateTime<Utc>) -> String {
    format!(
        "You are a planning assistant. The current date and time is {}.\n\
         Break the following plan description into concrete tasks. For each \
         task give a short title, an estimated duration in whole minutes, \
         and optional notes.\n\nPlan description:\n{}",
        reference_time.to_rfc3339(),
        description
    )
}

/// Response schema the model is asked to conform to: a `tasks` array whose
/// items require `title` and `duration`, with `notes` optional.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "duration": { "type": "INTEGER" },
                        "notes": { "type": "STRING" }
                    },
                    "required": ["title", "duration"]
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_credential_returns_empty() {
        let client = PlanClient::new(None);
        assert!(!client.has_credential());
        let extraction = client.extract_tasks("plan my day", Utc::now()).await;
        assert!(extraction.tasks.is_empty());
    }

    #[tokio::test]
    async fn empty_string_credential_counts_as_absent() {
        let client = PlanClient::new(Some(String::new()));
        assert!(!client.has_credential());
        let extraction = client.extract_tasks("plan my day", Utc::now()).await;
        assert!(extraction.tasks.is_empty());
    }

    #[test]
    fn prompt_carries_reference_time_and_description() {
        let at = "2026-08-05T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let prompt = build_prompt("finish the quarterly report", at);
        assert!(prompt.contains("2026-08-05T09:00:00+00:00"));
        assert!(prompt.contains("finish the quarterly report"));
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let client = PlanClient::new(Some("k".into())).with_base_url("http://localhost:9/");
        assert_eq!(client.base_url, "http://localhost:9");
    }
}
