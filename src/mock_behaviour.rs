//! This module provides ways to tweak a mocked planner server, so that it can return errors on some tests

use crate::error::ApiError;

/// This stores some behaviour tweaks, that describe how a mocked instance will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub session_behaviour: (u32, u32),
    pub calendar_events_behaviour: (u32, u32),
    pub delete_event_behaviour: (u32, u32),
    pub add_task_behaviour: (u32, u32),
    pub suggestions_behaviour: (u32, u32),
    pub chat_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            session_behaviour: (0, n_fails),
            calendar_events_behaviour: (0, n_fails),
            delete_event_behaviour: (0, n_fails),
            add_task_behaviour: (0, n_fails),
            suggestions_behaviour: (0, n_fails),
            chat_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_check_session(&mut self) -> Result<(), ApiError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.session_behaviour, "session")
    }
    pub fn can_get_calendar_events(&mut self) -> Result<(), ApiError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.calendar_events_behaviour, "calendar_events")
    }
    pub fn can_delete_event(&mut self) -> Result<(), ApiError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_event_behaviour, "delete_event")
    }
    pub fn can_add_task(&mut self) -> Result<(), ApiError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.add_task_behaviour, "add_task")
    }
    pub fn can_get_suggestions(&mut self) -> Result<(), ApiError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.suggestions_behaviour, "suggestions")
    }
    pub fn can_chat(&mut self) -> Result<(), ApiError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.chat_behaviour, "chat")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), ApiError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(ApiError::Api(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value)))
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_chat().is_ok());
        assert!(ok.can_chat().is_ok());
        assert!(ok.can_chat().is_ok());
        assert!(ok.can_add_task().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_add_task().is_err());
        assert!(now.can_delete_event().is_err());
        assert!(now.can_delete_event().is_err());
        assert!(now.can_add_task().is_err());
        assert!(now.can_add_task().is_ok());
        assert!(now.can_add_task().is_ok());
        assert!(now.can_delete_event().is_ok());

        let mut custom = MockBehaviour{
            suggestions_behaviour: (0,1),
            chat_behaviour: (1,3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_get_suggestions().is_err());
        assert!(custom.can_get_suggestions().is_ok());
        assert!(custom.can_get_suggestions().is_ok());
        assert!(custom.can_chat().is_ok());
        assert!(custom.can_chat().is_err());
        assert!(custom.can_chat().is_err());
        assert!(custom.can_chat().is_err());
        assert!(custom.can_chat().is_ok());

        let mut suspended = MockBehaviour::fail_now(1);
        suspended.suspend();
        assert!(suspended.can_check_session().is_ok());
        suspended.resume();
        assert!(suspended.can_check_session().is_err());
        assert!(suspended.can_check_session().is_ok());
    }
}
