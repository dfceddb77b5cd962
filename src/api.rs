//! Request and response bodies exchanged with the planner server
//!
//! Every endpoint speaks JSON. Fields the server may omit are `Option`s or fall back to their defaults,
//! so that a partial response never fails to decode.

use serde::{Deserialize, Serialize};

use crate::suggestion::Suggestion;

/// `GET /api/session`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// `GET /calendar`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarResponse {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

/// A calendar event, as returned by the calendar backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<EventStart>,
    #[serde(default, rename = "htmlLink")]
    pub html_link: Option<String>,
}

impl CalendarEvent {
    /// The start timestamp of a timed event (all-day events have none)
    pub fn start_date_time(&self) -> Option<&str> {
        self.start.as_ref()
            .and_then(|start| start.date_time.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventStart {
    #[serde(default, rename = "dateTime")]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// `POST /calendar/delete`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteEventRequest {
    pub event_id: String,
}

/// `POST /addtask`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddTaskRequest {
    pub task_text: String,
    /// Machine-readable date (ISO-8601, or whatever raw string a suggestion carried)
    pub event_date: String,
    /// Human-readable date
    pub display_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}

/// Extra context sent along with tasks created from a suggestion
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub has_event_date: bool,
    pub has_deadline: bool,
    /// Names of the date attributes the suggestion card carried
    #[serde(rename = "dom_attributes")]
    pub attributes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddTaskResponse {
    /// The task title, as rewritten by the server
    #[serde(default)]
    pub response: Option<String>,
    /// The deadline, formatted for display by the server
    #[serde(default)]
    pub deadline: Option<String>,
    /// Link to the created calendar event
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// `POST /addsuggestion`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// `POST /chat`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub command_detected: Option<bool>,
}

/// The body of a failed response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}
