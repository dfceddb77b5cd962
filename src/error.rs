//! Errors returned by the planner API

use std::fmt::{Display, Formatter};

/// The ways a call to the planner server can fail
#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
    /// The server answered 401 or 403. It may tell where the user should log in.
    AuthRequired { redirect: Option<String> },
    /// The server answered with another non-success status
    Api(String),
    /// The request could not be sent, or its response could not be decoded
    Transport(String),
}

impl ApiError {
    pub fn is_auth_required(&self) -> bool {
        match self {
            ApiError::AuthRequired{ .. } => true,
            _ => false,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::AuthRequired{ .. } => write!(f, "Authentication required"),
            ApiError::Api(msg) => write!(f, "{}", msg),
            ApiError::Transport(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Transport(format!("Invalid response body: {}", err))
    }
}
