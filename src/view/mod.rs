//! The state of every element of the page
//!
//! These types hold no reference to the network or to the storage: they are updated by the [`Controller`](crate::controller::Controller).

mod task_list;
pub use task_list::{DeleteControl, TaskEntry, TaskForm, TaskList};
mod suggestion_feed;
pub use suggestion_feed::{FeedState, SuggestionFeed};
mod chat;
pub use chat::{ChatLog, ChatMessage};
mod panel;
pub use panel::{Panel, PanelSide, Panels};
pub mod notification;
pub use notification::{Notification, NotificationKind, Notifications};
