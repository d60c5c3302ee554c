//! HTTP-level tests for the plan extraction client, backed by mockito.

use chrono::Utc;
use mockito::Matcher;

use pomoplan_core::planner::PlanClient;

const MODEL_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

/// Wrap candidate text in the endpoint's response envelope.
fn envelope(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
    .to_string()
}

fn client_for(server: &mockito::Server) -> PlanClient {
    PlanClient::new(Some("test-key".into())).with_base_url(server.url())
}

#[tokio::test]
async fn extracts_tasks_from_schema_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(
            r#"{"tasks":[
                {"title":"Draft outline","duration":25},
                {"title":"Email review","duration":15,"notes":"after lunch"}
            ]}"#,
        ))
        .create_async()
        .await;

    let extraction = client_for(&server)
        .extract_tasks("outline the report, then catch up on email", Utc::now())
        .await;

    mock.assert_async().await;
    assert_eq!(extraction.tasks.len(), 2);
    assert_eq!(extraction.tasks[0].title, "Draft outline");
    assert_eq!(extraction.tasks[0].duration, 25);
    assert_eq!(extraction.tasks[1].notes.as_deref(), Some("after lunch"));
}

#[tokio::test]
async fn credential_is_sent_as_query_parameter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_body(envelope(r#"{"tasks":[]}"#))
        .create_async()
        .await;

    client_for(&server).extract_tasks("plan", Utc::now()).await;
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_candidate_text_degrades_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(envelope("sure, here is your plan!"))
        .create_async()
        .await;

    let extraction = client_for(&server).extract_tasks("plan", Utc::now()).await;
    assert!(extraction.tasks.is_empty());
}

#[tokio::test]
async fn unparseable_body_degrades_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let extraction = client_for(&server).extract_tasks("plan", Utc::now()).await;
    assert!(extraction.tasks.is_empty());
}

#[tokio::test]
async fn response_without_tasks_field_defaults_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(envelope("{}"))
        .create_async()
        .await;

    let extraction = client_for(&server).extract_tasks("plan", Utc::now()).await;
    assert!(extraction.tasks.is_empty());
}

#[tokio::test]
async fn server_error_degrades_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("backend unavailable")
        .create_async()
        .await;

    let extraction = client_for(&server).extract_tasks("plan", Utc::now()).await;
    assert!(extraction.tasks.is_empty());
}

#[tokio::test]
async fn missing_credential_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = PlanClient::new(None).with_base_url(server.url());
    let extraction = client.extract_tasks("plan", Utc::now()).await;

    mock.assert_async().await;
    assert!(extraction.tasks.is_empty());
}
