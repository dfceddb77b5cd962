use crate::error::ApiError;
use crate::traits::PlannerApi;

use super::Controller;

impl<A: PlannerApi> Controller<A> {
    /// Make sure the session is authenticated. Otherwise, navigate to the login page and return `false`.
    ///
    /// This is never retried: a failure is final for this page load.
    pub async fn check_session(&mut self) -> bool {
        match self.api.session().await {
            Ok(session) if session.authenticated => true,
            Ok(session) => {
                log::info!("Session not valid, redirecting to login page");
                let target = session.redirect
                    .filter(|r| r.is_empty() == false)
                    .unwrap_or_else(|| self.settings.login_path.clone());
                self.redirect(target);
                false
            },
            Err(err) => {
                log::error!("Error checking session: {}", err);
                let target = match err {
                    ApiError::AuthRequired{ redirect: Some(redirect) } => redirect,
                    _ => self.settings.login_path.clone(),
                };
                self.redirect(target);
                false
            },
        }
    }

    /// Run what happens when the page is loaded: check the session, then (only if it is valid) load the calendar events and the suggestions.
    ///
    /// Returns whether the session was valid.
    pub async fn initialize(&mut self) -> bool {
        if self.check_session().await == false {
            return false;
        }

        self.load_calendar().await;
        self.refresh_suggestions().await;
        true
    }
}
