//! An in-memory planner server, used in tests
//!
//! Its failures can be scripted with a [`MockBehaviour`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::api::{AddTaskRequest, AddTaskResponse, CalendarEvent, EventStart, SessionStatus};
use crate::error::ApiError;
use crate::mock_behaviour::MockBehaviour;
use crate::suggestion::Suggestion;
use crate::traits::PlannerApi;

#[derive(Debug, Default)]
struct MockState {
    authenticated: bool,
    login_redirect: Option<String>,
    offline: bool,

    events: Vec<CalendarEvent>,
    suggestions: Vec<Suggestion>,
    chat_replies: VecDeque<String>,

    delete_requests: Vec<String>,
    add_task_requests: Vec<AddTaskRequest>,
    chat_messages: Vec<String>,
}

/// A [`PlannerApi`] that keeps its calendar in memory
#[derive(Debug)]
pub struct MockApi {
    state: Mutex<MockState>,
    behaviour: Arc<Mutex<MockBehaviour>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// An authenticated server, with an empty calendar and nothing to suggest
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState{ authenticated: true, ..MockState::default() }),
            behaviour: Arc::new(Mutex::new(MockBehaviour::new())),
        }
    }

    /// A server that rejects every request, and tells to log in at `redirect` (if any)
    pub fn unauthenticated(redirect: Option<&str>) -> Self {
        let api = Self::new();
        api.set_authenticated(false, redirect);
        api
    }

    pub fn with_events(self, events: Vec<CalendarEvent>) -> Self {
        self.state().events = events;
        self
    }

    pub fn with_suggestions(self, suggestions: Vec<Suggestion>) -> Self {
        self.set_suggestions(suggestions);
        self
    }

    pub fn with_behaviour(self, behaviour: MockBehaviour) -> Self {
        *lock(&self.behaviour) = behaviour;
        self
    }

    pub fn set_authenticated(&self, authenticated: bool, redirect: Option<&str>) {
        let mut state = self.state();
        state.authenticated = authenticated;
        state.login_redirect = redirect.map(|r| r.to_string());
    }

    /// When offline, every request fails as if the server could not be reached
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    pub fn set_suggestions(&self, suggestions: Vec<Suggestion>) {
        self.state().suggestions = suggestions;
    }

    /// The next chat message will be answered with `reply`. Unqueued messages are echoed.
    pub fn queue_chat_reply<S: ToString>(&self, reply: S) {
        self.state().chat_replies.push_back(reply.to_string());
    }

    pub fn behaviour(&self) -> &Arc<Mutex<MockBehaviour>> {
        &self.behaviour
    }

    /// The events currently in the calendar
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.state().events.clone()
    }

    /// Every event ID a deletion was requested for, in order
    pub fn delete_requests(&self) -> Vec<String> {
        self.state().delete_requests.clone()
    }

    pub fn add_task_requests(&self) -> Vec<AddTaskRequest> {
        self.state().add_task_requests.clone()
    }

    pub fn chat_messages(&self) -> Vec<String> {
        self.state().chat_messages.clone()
    }

    /// Build a calendar event, as the calendar backend would return it
    pub fn event(id: &str, summary: &str, start: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            id: Some(id.to_string()),
            summary: Some(summary.to_string()),
            start: start.map(|s| EventStart{ date_time: Some(s.to_string()), date: None }),
            html_link: Some(event_link(id)),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        lock(&self.state)
    }

    /// Fails the way the server would, if it is offline or the session is invalid
    fn check_reachable(&self) -> Result<(), ApiError> {
        let state = self.state();
        if state.offline {
            return Err(ApiError::Transport("error sending request: connection refused".to_string()));
        }
        if state.authenticated == false {
            return Err(ApiError::AuthRequired{ redirect: state.login_redirect.clone() });
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn event_link(id: &str) -> String {
    format!("https://www.google.com/calendar/event?eid={}", id)
}

#[async_trait]
impl PlannerApi for MockApi {
    async fn session(&self) -> Result<SessionStatus, ApiError> {
        lock(&self.behaviour).can_check_session()?;
        let state = self.state();
        if state.offline {
            return Err(ApiError::Transport("error sending request: connection refused".to_string()));
        }
        Ok(SessionStatus {
            authenticated: state.authenticated,
            redirect: state.login_redirect.clone(),
        })
    }

    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        self.check_reachable()?;
        lock(&self.behaviour).can_get_calendar_events()?;
        Ok(self.state().events.clone())
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), ApiError> {
        self.check_reachable()?;
        lock(&self.behaviour).can_delete_event()?;

        let mut state = self.state();
        state.delete_requests.push(event_id.to_string());
        state.events.retain(|event| event.id.as_deref() != Some(event_id));
        Ok(())
    }

    async fn add_task(&self, request: &AddTaskRequest) -> Result<AddTaskResponse, ApiError> {
        self.check_reachable()?;
        lock(&self.behaviour).can_add_task()?;

        let mut state = self.state();
        state.add_task_requests.push(request.clone());

        let id = uuid::Uuid::new_v4().to_simple().to_string();
        let start = Some(request.event_date.clone()).filter(|d| d.is_empty() == false);
        let event = CalendarEvent {
            id: Some(id.clone()),
            summary: Some(request.task_text.clone()),
            start: start.map(|s| EventStart{ date_time: Some(s), date: None }),
            html_link: Some(event_link(&id)),
        };
        state.events.push(event);

        Ok(AddTaskResponse {
            response: Some(request.task_text.clone()),
            deadline: Some(request.display_date.clone()).filter(|d| d.is_empty() == false),
            event: Some(event_link(&id)),
            location: None,
        })
    }

    async fn suggestions(&self) -> Result<Vec<Suggestion>, ApiError> {
        self.check_reachable()?;
        lock(&self.behaviour).can_get_suggestions()?;
        Ok(self.state().suggestions.clone())
    }

    async fn chat(&self, message: &str) -> Result<String, ApiError> {
        self.check_reachable()?;
        lock(&self.behaviour).can_chat()?;

        let mut state = self.state();
        state.chat_messages.push(message.to_string());
        Ok(state.chat_replies.pop_front()
            .unwrap_or_else(|| format!("You said: {}", message)))
    }
}
