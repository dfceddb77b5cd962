//! This crate provides a client for a task-planning web service.
//!
//! The server keeps the user's calendar, proposes tasks it extracted from their emails, and answers chat messages.
//! It is reached through the [`PlannerApi`](traits::PlannerApi) trait, implemented over HTTP by the [`client`] module.
//!
//! The [`Controller`](controller::Controller) is the view-model of the planner page: it owns the task list, the suggestion feed and the chat,
//! and keeps the server in sync with them. \
//! The IDs of calendar events and emails that have already been dealt with are persisted by the [`storage`] module, so that they are not suggested again.

pub mod traits;
pub mod api;
pub mod error;
pub use error::ApiError;

mod task;
pub use task::{Task, TaskStatus};
mod suggestion;
pub use suggestion::{Suggestion, SuggestionCard};

pub mod view;
pub mod controller;
pub use controller::Controller;

pub mod client;
pub mod storage;

pub mod config;
pub mod utils;

pub mod mock_behaviour;
pub mod mock_api;
