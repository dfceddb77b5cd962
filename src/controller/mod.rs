//! The view-model of the planner page
//!
//! A [`Controller`] owns the state of every element of the page, the persisted exclusion sets, and a [`PlannerApi`] to talk to the server.
//! Every user action (a click, a form submission...) is a method call on it.
//! It is built once per page load, with [`Controller::new`], then [`Controller::initialize`]d.

use uuid::Uuid;

use crate::config::Settings;
use crate::error::ApiError;
use crate::storage::Storage;
use crate::traits::PlannerApi;
use crate::view::{ChatLog, Notifications, PanelSide, Panels, SuggestionFeed, TaskForm, TaskList};
use crate::view::notification::NotificationSender;

mod session;
mod tasks;
mod suggestions;
mod chat;


/// The outcome of an attempt to add a task (from the form, or from a suggestion)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The input was invalid. Nothing was sent.
    Invalid,
    /// A task with the same text already exists. Nothing was sent.
    Duplicate,
    /// There is no such suggestion
    NotFound,
    /// The server created the task
    Synced(Uuid),
    /// The server could not be reached, the task only lives locally
    LocalOnly(Uuid),
    /// The session is not valid anymore
    Redirected,
}

/// The outcome of a click on the delete button of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound,
    /// The task had no calendar event, it was just removed
    Removed,
    /// The calendar event has been deleted, and the task removed
    Deleted,
    /// The calendar event could not be deleted, but the task has been removed anyway
    RemovedAfterFailure,
    /// The session is not valid anymore. The task is kept.
    Redirected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FetchKind {
    Calendar,
    Suggestions,
}

/// Identifies a fetch that has been started. Only the result of the latest fetch of a given kind is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    kind: FetchKind,
    generation: u64,
}


/// See [the module documentation](self)
pub struct Controller<A: PlannerApi> {
    api: A,
    storage: Storage,
    settings: Settings,

    tasks: TaskList,
    task_form: TaskForm,
    suggestions: SuggestionFeed,
    chat: ChatLog,
    panels: Panels,
    notifications: Notifications,

    /// Where the page has been sent to, if the session turned out to be invalid
    navigation: Option<String>,

    calendar_generation: u64,
    suggestions_generation: u64,
}

impl<A: PlannerApi> Controller<A> {
    pub fn new(api: A, storage: Storage, settings: Settings) -> Self {
        Self::new_with_notifications(api, storage, settings, Notifications::new())
    }

    /// Create a controller that sends every notification to `channel`
    pub fn new_with_notification_channel(api: A, storage: Storage, settings: Settings, channel: NotificationSender) -> Self {
        Self::new_with_notifications(api, storage, settings, Notifications::new_with_channel(channel))
    }

    fn new_with_notifications(api: A, storage: Storage, settings: Settings, notifications: Notifications) -> Self {
        Self {
            api, storage, settings,
            tasks: TaskList::new(),
            task_form: TaskForm::default(),
            suggestions: SuggestionFeed::new(),
            chat: ChatLog::new(),
            panels: Panels::default(),
            notifications,
            navigation: None,
            calendar_generation: 0,
            suggestions_generation: 0,
        }
    }

    pub fn api(&self) -> &A                             { &self.api }
    pub fn storage(&self) -> &Storage                   { &self.storage }
    pub fn settings(&self) -> &Settings                 { &self.settings }
    pub fn tasks(&self) -> &TaskList                    { &self.tasks }
    pub fn task_form(&self) -> &TaskForm                { &self.task_form }
    pub fn task_form_mut(&mut self) -> &mut TaskForm    { &mut self.task_form }
    pub fn suggestions(&self) -> &SuggestionFeed        { &self.suggestions }
    pub fn chat(&self) -> &ChatLog                      { &self.chat }
    pub fn chat_mut(&mut self) -> &mut ChatLog          { &mut self.chat }
    pub fn panels(&self) -> &Panels                     { &self.panels }
    pub fn notifications(&self) -> &Notifications       { &self.notifications }

    /// Where the page has been redirected to, if it has
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    /// Expand or collapse a side panel. This is what both its trigger and its close button do.
    pub fn toggle_panel(&mut self, side: PanelSide) {
        self.panels.toggle(side);
    }

    fn redirect(&mut self, target: String) {
        log::info!("Redirecting to {}", target);
        self.navigation = Some(target);
    }

    /// Navigate away if `err` is an authentication failure. Returns whether it was one.
    fn redirect_on_auth_failure(&mut self, err: &ApiError) -> bool {
        match err {
            ApiError::AuthRequired{ redirect } => {
                let target = redirect.clone()
                    .unwrap_or_else(|| self.settings.login_path.clone());
                self.redirect(target);
                true
            },
            _ => false,
        }
    }

    fn new_ticket(&mut self, kind: FetchKind) -> FetchTicket {
        let counter = match kind {
            FetchKind::Calendar => &mut self.calendar_generation,
            FetchKind::Suggestions => &mut self.suggestions_generation,
        };
        *counter += 1;
        FetchTicket{ kind, generation: *counter }
    }

    fn is_current(&self, ticket: &FetchTicket, kind: FetchKind) -> bool {
        let current = match kind {
            FetchKind::Calendar => self.calendar_generation,
            FetchKind::Suggestions => self.suggestions_generation,
        };
        ticket.kind == kind && ticket.generation == current
    }
}
