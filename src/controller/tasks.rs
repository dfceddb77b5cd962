use uuid::Uuid;

use crate::api::{AddTaskRequest, AddTaskResponse, CalendarEvent};
use crate::error::ApiError;
use crate::storage::ExclusionSet;
use crate::task::{Task, TaskStatus};
use crate::traits::PlannerApi;
use crate::utils::dates::{format_display_date, parse_form_deadline};
use crate::view::DeleteControl;

use super::{AddOutcome, Controller, DeleteOutcome, FetchKind, FetchTicket};

impl<A: PlannerApi> Controller<A> {
    /// Append a task to the list. Nothing is sent to the server.
    ///
    /// An empty `text` is ignored. If `event_id` is given, deleting the task will delete this calendar event.
    pub fn add_task(&mut self, text: &str, deadline: Option<String>, event_link: Option<String>, event_id: Option<String>) -> Option<Uuid> {
        let task = Task::new_with_parameters(text.to_string(), deadline, event_link, event_id);
        self.tasks.add(task)
    }

    /// Change the status shown for a task. This is not sent to the server.
    pub fn set_task_status(&mut self, id: Uuid, status: TaskStatus) -> bool {
        self.tasks.set_status(id, status)
    }

    /// Submit the "add a task" form: create the task on the server, or locally if the server cannot be reached
    pub async fn submit_task_form(&mut self) -> AddOutcome {
        let text = self.task_form.text().trim().to_string();
        let deadline_input = self.task_form.deadline().trim().to_string();

        if text.is_empty() {
            self.task_form.set_error("Please enter a task!");
            return AddOutcome::Invalid;
        }

        if self.tasks.contains_text(&text) {
            self.notifications.error("This task already exists in your list!");
            return AddOutcome::Duplicate;
        }

        let deadline = if deadline_input.is_empty() {
            None
        } else {
            match parse_form_deadline(&deadline_input) {
                Ok(deadline) => Some(deadline),
                Err(err) => {
                    log::warn!("{}", err);
                    self.task_form.set_error("Please enter a valid deadline!");
                    return AddOutcome::Invalid;
                },
            }
        };
        let display_date = deadline.as_ref()
            .map(|d| d.display_date.clone())
            .unwrap_or_default();

        let request = AddTaskRequest {
            task_text: text.clone(),
            event_date: deadline.map(|d| d.event_date).unwrap_or_default(),
            display_date: display_date.clone(),
            raw_deadline: None,
            debug_info: None,
        };

        let outcome = match self.api.add_task(&request).await {
            Ok(response) => {
                let id = self.add_created_task(response, &text, &display_date);
                self.notifications.success("Task added successfully!");
                match id {
                    Some(id) => AddOutcome::Synced(id),
                    None => AddOutcome::Invalid,
                }
            },
            Err(err) => {
                if self.redirect_on_auth_failure(&err) {
                    return AddOutcome::Redirected;
                }
                log::error!("Error adding task: {}", err);
                self.notifications.error(&format!("Error: {}", err));
                match self.add_task(&text, Some(display_date), None, None) {
                    Some(id) => AddOutcome::LocalOnly(id),
                    None => AddOutcome::Invalid,
                }
            },
        };

        self.task_form.clear();
        outcome
    }

    /// Add the task the server has just created, and remember its calendar event
    pub(super) fn add_created_task(&mut self, response: AddTaskResponse, fallback_text: &str, fallback_deadline: &str) -> Option<Uuid> {
        let event_link = response.event.filter(|link| link.is_empty() == false);
        let event_id = event_link.as_deref()
            .and_then(crate::utils::extract_event_id_from_url);

        if let Some(event_id) = &event_id {
            log::debug!("Added task with calendar event ID: {}", event_id);
            self.storage.insert(ExclusionSet::CurrentEventIds, event_id);
        }

        let text = response.response
            .filter(|r| r.trim().is_empty() == false)
            .unwrap_or_else(|| fallback_text.to_string());
        let deadline = response.deadline
            .filter(|d| d.is_empty() == false)
            .unwrap_or_else(|| fallback_deadline.to_string());

        self.add_task(&text, Some(deadline), event_link, event_id)
    }

    /// Click on the delete button of a task.
    ///
    /// If the task has a calendar event, this event is deleted first, and the delete button shows the progress.
    /// Whether this deletion succeeds or not, the task is eventually removed from the list.
    pub async fn delete_task(&mut self, id: Uuid) -> DeleteOutcome {
        let event_id = match self.tasks.get(id) {
            None => return DeleteOutcome::NotFound,
            Some(entry) => {
                if entry.delete_control().is_enabled() == false {
                    log::debug!("A deletion is already in progress for this task");
                    return DeleteOutcome::NotFound;
                }
                entry.task().event_id().map(|e| e.to_string())
            },
        };

        let event_id = match event_id {
            None => {
                self.tasks.remove(id);
                return DeleteOutcome::Removed;
            },
            Some(event_id) => event_id,
        };

        self.tasks.set_delete_control(id, DeleteControl::Pending);
        log::info!("Deleting calendar event with ID: {}", event_id);

        match self.api.delete_event(&event_id).await {
            Ok(()) => {
                self.tasks.set_delete_control(id, DeleteControl::Succeeded);
                self.notifications.success("Event deleted successfully from calendar!");
                // So that this event is never suggested again
                self.storage.insert(ExclusionSet::DeletedEventIds, &event_id);

                tokio::time::sleep(self.settings.delete_success_delay).await;
                self.tasks.remove(id);
                DeleteOutcome::Deleted
            },
            Err(err) => {
                if self.redirect_on_auth_failure(&err) {
                    return DeleteOutcome::Redirected;
                }
                match &err {
                    ApiError::Transport(_) => {
                        log::error!("Error deleting calendar event: {}", err);
                        self.notifications.error(&format!("Error deleting event: {}", err));
                    },
                    _ => {
                        log::error!("Failed to delete calendar event: {}", err);
                        self.notifications.error(&format!("Failed to delete calendar event: {}", err));
                        self.tasks.set_delete_control(id, DeleteControl::Failed);
                        tokio::time::sleep(self.settings.delete_failure_delay).await;
                    },
                }
                self.tasks.remove(id);
                DeleteOutcome::RemovedAfterFailure
            },
        }
    }

    /// Start loading the calendar events. Pass the ticket to [`Self::apply_calendar`] once they are received.
    ///
    /// Starting a new load makes the results of every previous one obsolete.
    pub fn begin_calendar_load(&mut self) -> FetchTicket {
        self.new_ticket(FetchKind::Calendar)
    }

    /// Replace the task list with the calendar events, unless a newer load has started since `ticket` was issued.
    ///
    /// An empty calendar leaves the task list untouched. Returns whether the result has been applied.
    pub fn apply_calendar(&mut self, ticket: FetchTicket, result: Result<Vec<CalendarEvent>, ApiError>) -> bool {
        if self.is_current(&ticket, FetchKind::Calendar) == false {
            log::debug!("Ignoring an obsolete calendar response");
            return false;
        }

        let events = match result {
            Ok(events) => events,
            Err(err) => {
                if self.redirect_on_auth_failure(&err) {
                    return true;
                }
                log::error!("Error loading calendar events: {}", err);
                self.notifications.error(&format!("Error loading events: {}", err));
                return true;
            },
        };

        if events.is_empty() {
            return true;
        }

        self.tasks.clear();
        let mut event_ids = Vec::new();
        for event in events {
            let title = event.summary.clone().unwrap_or_default();
            let start = event.start_date_time().and_then(format_display_date);
            log::debug!("Loading calendar event: {}, ID: {:?}", title, event.id);

            let event_id = event.id.clone();
            if self.add_task(&title, start, event.html_link, event.id).is_some() {
                event_ids.extend(event_id);
            }
        }

        self.storage.extend(ExclusionSet::CurrentEventIds, &event_ids);
        true
    }

    /// Load the calendar events into the task list
    pub async fn load_calendar(&mut self) -> bool {
        let ticket = self.begin_calendar_load();
        let result = self.api.calendar_events().await;
        self.apply_calendar(ticket, result)
    }
}
