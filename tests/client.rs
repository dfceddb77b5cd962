//! Tests of the HTTP client against a local server

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskmate::client::Client;
use taskmate::traits::PlannerApi;
use taskmate::ApiError;


async fn server_and_client() -> (MockServer, Client) {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    let client = Client::new(server.uri()).unwrap();
    (server, client)
}


#[tokio::test]
async fn test_calendar_events() {
    let (server, client) = server_and_client().await;
    Mock::given(method("GET"))
        .and(path("/calendar"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [
                {"id": "e1", "summary": "Dentist", "start": {"dateTime": "2024-05-01T14:30:00Z"}, "htmlLink": "https://www.google.com/calendar/event?eid=e1"}
            ]
        })))
        .mount(&server)
        .await;

    let events = client.calendar_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id.as_deref(), Some("e1"));
    assert_eq!(events[0].start_date_time(), Some("2024-05-01T14:30:00Z"));
}

#[tokio::test]
async fn test_delete_event_body() {
    let (server, client) = server_and_client().await;
    Mock::given(method("POST"))
        .and(path("/calendar/delete"))
        .and(body_json(json!({"event_id": "abc123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.delete_event("abc123").await, Ok(()));
}

#[tokio::test]
async fn test_unauthorized_with_redirect() {
    let (server, client) = server_and_client().await;
    Mock::given(method("GET"))
        .and(path("/calendar"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"redirect": "/oauth"})))
        .mount(&server)
        .await;

    let err = client.calendar_events().await.unwrap_err();
    assert_eq!(err, ApiError::AuthRequired{ redirect: Some("/oauth".to_string()) });
}

#[tokio::test]
async fn test_forbidden_without_json_body() {
    let (server, client) = server_and_client().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(403).set_body_string("<html>Forbidden</html>"))
        .mount(&server)
        .await;

    let err = client.chat("hello").await.unwrap_err();
    assert_eq!(err, ApiError::AuthRequired{ redirect: None });
}

#[tokio::test]
async fn test_server_error_message() {
    let (server, client) = server_and_client().await;
    Mock::given(method("POST"))
        .and(path("/addtask"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let request = taskmate::api::AddTaskRequest {
        task_text: "Buy milk".to_string(),
        ..Default::default()
    };
    let err = client.add_task(&request).await.unwrap_err();
    assert_eq!(err, ApiError::Api("boom".to_string()));
}

#[tokio::test]
async fn test_server_error_without_body() {
    let (server, client) = server_and_client().await;
    Mock::given(method("POST"))
        .and(path("/addsuggestion"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.suggestions().await.unwrap_err();
    assert_eq!(err, ApiError::Api("API request failed".to_string()));
    assert_eq!(err.to_string(), "API request failed");
}

#[tokio::test]
async fn test_session_status() {
    let (server, client) = server_and_client().await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": true})))
        .mount(&server)
        .await;

    let session = client.session().await.unwrap();
    assert!(session.authenticated);
    assert_eq!(session.redirect, None);
}

#[tokio::test]
async fn test_session_with_error_status_is_not_authenticated() {
    let (server, client) = server_and_client().await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"authenticated": true, "redirect": "/welcome"})))
        .mount(&server)
        .await;

    let session = client.session().await.unwrap();
    assert!(session.authenticated == false);
    assert_eq!(session.redirect.as_deref(), Some("/welcome"));
}
