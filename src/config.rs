//! Support for library configuration options

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;
use url::Url;

/// Value of the `X-Requested-With` header sent with every request, so that the server answers with JSON rather than with HTML redirects.
pub static REQUESTED_WITH: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("XMLHttpRequest".to_string())));

/// The user agent of the HTTP client.
/// Feel free to override it when initing this library.
pub static USER_AGENT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(format!("taskmate/{}", env!("CARGO_PKG_VERSION")))));

pub const DEFAULT_URL: &str = "http://localhost:5000/";
pub const DEFAULT_STORAGE_FOLDER: &str = "taskmate_storage";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_EMAIL_LINK_BASE: &str = "https://mail.google.com/mail/u/0/#inbox/";

/// Read the current value of one of the string settings above
pub(crate) fn read_setting(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}


/// Settings of a [`Controller`](crate::controller::Controller) and of its [`Client`](crate::client::Client)
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Root URL of the planner server
    pub base_url: Url,
    /// Folder where the exclusion sets are persisted
    pub storage_folder: PathBuf,
    /// Where to go when the session is invalid and the server did not say where to log in
    pub login_path: String,
    /// Prepended to an email ID to get a link to this email
    pub email_link_base: String,
    /// How long a successful delete is shown before the task disappears
    pub delete_success_delay: Duration,
    /// How long a failed delete is shown before the task disappears
    pub delete_failure_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // DEFAULT_URL is a valid constant
            base_url: Url::parse(DEFAULT_URL).expect("invalid default URL"),
            storage_folder: PathBuf::from(DEFAULT_STORAGE_FOLDER),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            email_link_base: DEFAULT_EMAIL_LINK_BASE.to_string(),
            delete_success_delay: Duration::from_millis(500),
            delete_failure_delay: Duration::from_millis(1000),
        }
    }
}

impl Settings {
    /// Build settings from the `TASKMATE_URL` and `TASKMATE_STORAGE` environment variables, using defaults for missing ones
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let mut settings = Self::default();
        if let Ok(url) = std::env::var("TASKMATE_URL") {
            settings.base_url = Url::parse(&url)
                .map_err(|err| format!("Invalid TASKMATE_URL {:?}: {}", url, err))?;
        }
        if let Ok(folder) = std::env::var("TASKMATE_STORAGE") {
            settings.storage_folder = PathBuf::from(folder);
        }
        Ok(settings)
    }

    /// Settings suited to tests: no delay when deleting tasks
    pub fn without_delays(mut self) -> Self {
        self.delete_success_delay = Duration::from_millis(0);
        self.delete_failure_delay = Duration::from_millis(0);
        self
    }
}
