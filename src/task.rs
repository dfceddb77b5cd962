//! To-do tasks, as shown in the task list

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The progress of a task.
///
/// This is purely a display matter: it is never sent to the server, and is lost when the task list is rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not-started",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        *self == TaskStatus::Completed
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    /// Parse the value of a status selector. Spaces are accepted in place of dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "-").as_str() {
            "not-started" => Ok(TaskStatus::NotStarted),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("Unknown task status {:?}", other)),
        }
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The display name of the task
    text: String,
    /// The deadline, already formatted for display
    deadline: Option<String>,
    /// Link to the calendar event backing this task
    event_link: Option<String>,
    /// ID of the calendar event backing this task. Deleting the task deletes this event.
    event_id: Option<String>,

    status: TaskStatus,
}

impl Task {
    /// Create a task that only lives locally
    pub fn new<S: ToString>(text: S) -> Self {
        Self::new_with_parameters(text.to_string(), None, None, None)
    }

    /// Create a task that may be backed by a calendar event
    pub fn new_with_parameters(text: String, deadline: Option<String>,
                               event_link: Option<String>, event_id: Option<String>) -> Self
    {
        Self {
            text,
            deadline: deadline.filter(|d| d.is_empty() == false),
            event_link: event_link.filter(|l| l.is_empty() == false),
            event_id: event_id.filter(|i| i.is_empty() == false),
            status: TaskStatus::default(),
        }
    }

    pub fn text(&self) -> &str                  { &self.text }
    pub fn deadline(&self) -> Option<&str>      { self.deadline.as_deref() }
    pub fn event_link(&self) -> Option<&str>    { self.event_link.as_deref() }
    pub fn event_id(&self) -> Option<&str>      { self.event_id.as_deref() }
    pub fn status(&self) -> TaskStatus          { self.status }

    /// The key used to tell whether two tasks are duplicates
    pub fn dedup_key(&self) -> String {
        crate::utils::dedup_key(&self.text)
    }

    pub fn set_status(&mut self, new_status: TaskStatus) {
        self.status = new_status;
    }
}
