//! This module provides a client to connect to a planner server

use std::error::Error;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{AddTaskRequest, AddTaskResponse, CalendarEvent, CalendarResponse, ChatRequest, ChatResponse};
use crate::api::{DeleteEventRequest, ErrorBody, SessionStatus, SuggestionsResponse};
use crate::config::{read_setting, REQUESTED_WITH, USER_AGENT};
use crate::error::ApiError;
use crate::suggestion::Suggestion;
use crate::traits::PlannerApi;


/// A planner source that fetches its data from a planner server
///
/// The session cookie set by the server is kept in a cookie store shared by every request.
pub struct Client {
    url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self, Box<dyn Error>> {
        let url = Url::parse(url.as_ref())?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(read_setting(&USER_AGENT))
            .build()?;

        Ok(Self{ url, http })
    }

    pub fn url(&self) -> &Url { &self.url }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url.join(path)
            .map_err(|err| ApiError::Transport(format!("Invalid URL for {}: {}", path, err)))?;

        Ok(self.http
            .request(method, url)
            .header("X-Requested-With", read_setting(&REQUESTED_WITH)))
    }

    async fn send_and_parse<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        handle_api_response(response).await
    }
}

/// Turn an HTTP response into either its decoded body, or an error of the right kind
async fn handle_api_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        match &body.redirect {
            Some(redirect) => log::info!("Authentication required, redirecting to: {}", redirect),
            None => log::info!("Authentication error, redirecting to login"),
        }
        return Err(ApiError::AuthRequired{ redirect: body.redirect });
    }

    if status.is_success() == false {
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        return Err(ApiError::Api(body.error.unwrap_or_else(|| "API request failed".to_string())));
    }

    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl PlannerApi for Client {
    async fn session(&self) -> Result<SessionStatus, ApiError> {
        let response = self.request(Method::GET, "/api/session")?
            .send()
            .await?;
        let status = response.status();

        // An unauthenticated session is not an error: the body tells where to log in
        let mut session: SessionStatus = response.json().await?;
        if status.is_success() == false {
            session.authenticated = false;
        }
        Ok(session)
    }

    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        let builder = self.request(Method::GET, "/calendar")?;
        let calendar: CalendarResponse = self.send_and_parse(builder).await?;
        Ok(calendar.events)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), ApiError> {
        log::debug!("Deleting calendar event with ID: {}", event_id);
        let builder = self.request(Method::POST, "/calendar/delete")?
            .json(&DeleteEventRequest{ event_id: event_id.to_string() });
        let reply: serde_json::Value = self.send_and_parse(builder).await?;
        log::debug!("Response from deletion API: {}", reply);
        Ok(())
    }

    async fn add_task(&self, request: &AddTaskRequest) -> Result<AddTaskResponse, ApiError> {
        let builder = self.request(Method::POST, "/addtask")?
            .json(request);
        self.send_and_parse(builder).await
    }

    async fn suggestions(&self) -> Result<Vec<Suggestion>, ApiError> {
        let builder = self.request(Method::POST, "/addsuggestion")?
            .json(&serde_json::json!({}));
        let reply: SuggestionsResponse = self.send_and_parse(builder).await?;
        Ok(reply.suggestions)
    }

    async fn chat(&self, message: &str) -> Result<String, ApiError> {
        let builder = self.request(Method::POST, "/chat")?
            .json(&ChatRequest{ message: message.to_string() });
        let reply: ChatResponse = self.send_and_parse(builder).await?;
        if reply.command_detected == Some(true) {
            log::debug!("The server handled this message as a command");
        }
        Ok(reply.response)
    }
}
