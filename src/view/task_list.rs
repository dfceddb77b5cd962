//! The task list, and the form used to add tasks to it

use uuid::Uuid;

use crate::task::{Task, TaskStatus};

/// The state of the delete button of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteControl {
    Idle,
    /// The calendar event is being deleted
    Pending,
    Succeeded,
    Failed,
}

impl DeleteControl {
    pub fn symbol(&self) -> &'static str {
        match self {
            DeleteControl::Idle => "🗑️",
            DeleteControl::Pending => "⏳",
            DeleteControl::Succeeded => "✅",
            DeleteControl::Failed => "❌",
        }
    }

    /// Whether the button can be clicked
    pub fn is_enabled(&self) -> bool {
        *self == DeleteControl::Idle
    }
}

/// A task, as displayed in the list
#[derive(Clone, Debug, PartialEq)]
pub struct TaskEntry {
    id: Uuid,
    task: Task,
    delete_control: DeleteControl,
}

impl TaskEntry {
    pub fn id(&self) -> Uuid                        { self.id }
    pub fn task(&self) -> &Task                     { &self.task }
    pub fn delete_control(&self) -> DeleteControl   { self.delete_control }
}


/// The list of tasks, in display order
#[derive(Clone, Debug, Default)]
pub struct TaskList {
    entries: Vec<TaskEntry>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize          { self.entries.len() }
    pub fn is_empty(&self) -> bool      { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &TaskEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&TaskEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Append a task at the end of the list.
    /// Tasks with an empty text are ignored, and `None` is returned.
    pub fn add(&mut self, task: Task) -> Option<Uuid> {
        if task.text().trim().is_empty() {
            return None;
        }

        let id = Uuid::new_v4();
        self.entries.push(TaskEntry{
            id,
            task,
            delete_control: DeleteControl::Idle,
        });
        Some(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<TaskEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether a task with the same text (ignoring case and surrounding whitespace) is already in the list
    pub fn contains_text(&self, text: &str) -> bool {
        let key = crate::utils::dedup_key(text);
        self.entries.iter().any(|entry| entry.task.dedup_key() == key)
    }

    /// Returns `false` if there is no such task
    pub fn set_status(&mut self, id: Uuid, status: TaskStatus) -> bool {
        match self.get_mut(id) {
            None => false,
            Some(entry) => {
                entry.task.set_status(status);
                true
            },
        }
    }

    pub(crate) fn set_delete_control(&mut self, id: Uuid, state: DeleteControl) {
        if let Some(entry) = self.get_mut(id) {
            entry.delete_control = state;
        }
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut TaskEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }
}


/// The "add a task" form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskForm {
    text: String,
    /// As typed in a `datetime-local` input
    deadline: String,
    error: Option<String>,
}

impl TaskForm {
    pub fn text(&self) -> &str              { &self.text }
    pub fn deadline(&self) -> &str          { &self.deadline }
    /// The inline validation error, if any
    pub fn error(&self) -> Option<&str>     { self.error.as_deref() }

    pub fn set_text<S: ToString>(&mut self, text: S) {
        self.text = text.to_string();
    }

    pub fn set_deadline<S: ToString>(&mut self, deadline: S) {
        self.deadline = deadline.to_string();
    }

    pub(crate) fn set_error<S: ToString>(&mut self, error: S) {
        self.error = Some(error.to_string());
    }

    /// Empty the inputs and remove any error
    pub fn clear(&mut self) {
        self.text.clear();
        self.deadline.clear();
        self.error = None;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tasks_are_ignored() {
        let mut list = TaskList::new();
        assert_eq!(list.add(Task::new("")), None);
        assert_eq!(list.add(Task::new("   ")), None);
        assert_eq!(list.len(), 0);

        assert!(list.add(Task::new("Pay rent")).is_some());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let mut list = TaskList::new();
        list.add(Task::new("Pay rent"));
        assert!(list.contains_text("pay rent"));
        assert!(list.contains_text("  PAY RENT "));
        assert!(list.contains_text("Pay the rent") == false);
    }

    #[test]
    fn status_and_removal() {
        let mut list = TaskList::new();
        let id = list.add(Task::new("Call mom")).unwrap();
        let other = list.add(Task::new("Walk the dog")).unwrap();

        assert!(list.set_status(id, TaskStatus::InProgress));
        assert_eq!(list.get(id).unwrap().task().status(), TaskStatus::InProgress);
        assert_eq!(list.get(other).unwrap().task().status(), TaskStatus::NotStarted);

        list.set_delete_control(id, DeleteControl::Pending);
        assert!(list.get(id).unwrap().delete_control().is_enabled() == false);

        assert!(list.remove(id).is_some());
        assert!(list.remove(id).is_none());
        assert!(list.set_status(id, TaskStatus::Completed) == false);
        assert_eq!(list.len(), 1);
    }
}
