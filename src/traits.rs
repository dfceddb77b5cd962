use async_trait::async_trait;

use crate::api::{AddTaskRequest, AddTaskResponse, CalendarEvent, SessionStatus};
use crate::error::ApiError;
use crate::suggestion::Suggestion;

/// The endpoints of a planner server
///
/// This is implemented by the HTTP [`Client`](crate::client::Client), and by the [`MockApi`](crate::mock_api::MockApi) used in tests.
#[async_trait]
pub trait PlannerApi {
    /// Tell whether the current session is authenticated.
    /// The status is returned even when the server answers with an error status.
    async fn session(&self) -> Result<SessionStatus, ApiError>;

    /// Returns the upcoming events of the user's calendar
    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError>;
    /// Delete a calendar event
    async fn delete_event(&self, event_id: &str) -> Result<(), ApiError>;

    /// Create a task (and usually a calendar event backing it)
    async fn add_task(&self, request: &AddTaskRequest) -> Result<AddTaskResponse, ApiError>;
    /// Ask the server for candidate tasks
    async fn suggestions(&self) -> Result<Vec<Suggestion>, ApiError>;

    /// Send a chat message, and return the reply
    async fn chat(&self, message: &str) -> Result<String, ApiError>;
}
