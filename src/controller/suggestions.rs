use std::collections::HashSet;

use uuid::Uuid;

use crate::api::{AddTaskRequest, DebugInfo};
use crate::error::ApiError;
use crate::storage::ExclusionSet;
use crate::suggestion::{Suggestion, SuggestionCard};
use crate::traits::PlannerApi;
use crate::view::FeedState;

use super::{AddOutcome, Controller, FetchKind, FetchTicket};

impl<A: PlannerApi> Controller<A> {
    /// Start fetching suggestions, and show a loading placeholder meanwhile.
    /// Pass the ticket to [`Self::apply_suggestions`] once they are received.
    ///
    /// Starting a new fetch makes the results of every previous one obsolete.
    pub fn begin_suggestions_fetch(&mut self) -> FetchTicket {
        self.suggestions.set_state(FeedState::Loading);
        self.new_ticket(FetchKind::Suggestions)
    }

    /// Display the suggestions that are worth showing, unless a newer fetch has started since `ticket` was issued.
    ///
    /// Returns whether the result has been applied.
    pub fn apply_suggestions(&mut self, ticket: FetchTicket, result: Result<Vec<Suggestion>, ApiError>) -> bool {
        if self.is_current(&ticket, FetchKind::Suggestions) == false {
            log::debug!("Ignoring an obsolete suggestions response");
            return false;
        }

        let suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(err) => {
                if self.redirect_on_auth_failure(&err) == false {
                    log::error!("Unable to fetch suggestions: {}", err);
                    self.suggestions.set_state(FeedState::Failed(err.to_string()));
                }
                return true;
            },
        };

        if suggestions.is_empty() {
            self.suggestions.set_state(FeedState::NoSuggestions);
            return true;
        }

        let filtered = self.filter_suggestions(suggestions);
        if filtered.is_empty() {
            self.suggestions.set_state(FeedState::NoNewSuggestions);
            return true;
        }

        let email_link_base = self.settings.email_link_base.clone();
        let cards = filtered.into_iter()
            .map(|suggestion| SuggestionCard::new(suggestion, &email_link_base))
            .collect();
        self.suggestions.set_state(FeedState::Cards(cards));
        true
    }

    /// Fetch and display suggestions
    pub async fn refresh_suggestions(&mut self) -> bool {
        let ticket = self.begin_suggestions_fetch();
        let result = self.api.suggestions().await;
        self.apply_suggestions(ticket, result)
    }

    /// Keep only the suggestions worth showing.
    ///
    /// A suggestion is dropped when it has no text, when a task (or an earlier suggestion) with the same text already exists,
    /// or when its email has already been processed or deleted.
    pub fn filter_suggestions(&self, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        let mut seen = HashSet::new();

        suggestions.into_iter()
            .filter(|suggestion| {
                if suggestion.text.trim().is_empty() {
                    return false;
                }

                let key = crate::utils::dedup_key(&suggestion.text);
                if self.tasks.contains_text(&suggestion.text) {
                    log::debug!("Skipping suggestion already in task list: {}", suggestion.text);
                    return false;
                }

                if let Some(email_id) = suggestion.email_id.as_deref().filter(|id| id.is_empty() == false) {
                    if self.storage.contains(ExclusionSet::ProcessedEmails, email_id)
                        || self.storage.contains(ExclusionSet::DeletedEventIds, email_id)
                    {
                        log::debug!("Skipping suggestion from processed email: {}", email_id);
                        return false;
                    }
                }

                seen.insert(key)
            })
            .collect()
    }

    /// Click on "Add to Task List" on a suggestion card.
    ///
    /// The task is created on the server, or locally if the server cannot be reached. The card is removed in both cases.
    pub async fn accept_suggestion(&mut self, card_id: Uuid) -> AddOutcome {
        let card = match self.suggestions.card(card_id) {
            None => return AddOutcome::NotFound,
            Some(card) => card.clone(),
        };

        if self.tasks.contains_text(card.text()) {
            self.notifications.error("This task already exists in your list!");
            self.suggestions.remove_card(card_id);
            return AddOutcome::Duplicate;
        }

        let deadline = card.deadline().unwrap_or_default().to_string();
        let event_date = card.event_date().unwrap_or_default().to_string();
        let request = AddTaskRequest {
            task_text: card.text().to_string(),
            event_date: event_date.clone(),
            display_date: deadline.clone(),
            raw_deadline: Some(deadline.clone()),
            debug_info: Some(DebugInfo {
                has_event_date: event_date.is_empty() == false,
                has_deadline: deadline.is_empty() == false,
                attributes: card.date_attributes(),
            }),
        };
        log::debug!("Adding suggestion to tasks with date info: {:?}", request);

        match self.api.add_task(&request).await {
            Ok(response) => {
                if let Some(email_id) = card.email_id() {
                    self.storage.insert(ExclusionSet::ProcessedEmails, email_id);
                }

                let id = self.add_created_task(response, card.text(), &deadline);
                self.notifications.success("Task added to calendar!");
                self.suggestions.remove_card(card_id);
                match id {
                    Some(id) => AddOutcome::Synced(id),
                    None => AddOutcome::Invalid,
                }
            },
            Err(err) => {
                if self.redirect_on_auth_failure(&err) {
                    return AddOutcome::Redirected;
                }
                log::error!("Error adding suggested task: {}", err);
                self.notifications.error(&format!("Error adding task: {}", err));
                let id = self.add_task(card.text(), Some(deadline), None, None);
                self.suggestions.remove_card(card_id);
                match id {
                    Some(id) => AddOutcome::LocalOnly(id),
                    None => AddOutcome::Invalid,
                }
            },
        }
    }

    /// Click on "Dismiss" on a suggestion card. Its email will not be suggested again.
    ///
    /// Returns `false` if there is no such card.
    pub fn dismiss_suggestion(&mut self, card_id: Uuid) -> bool {
        let card = match self.suggestions.remove_card(card_id) {
            None => return false,
            Some(card) => card,
        };

        if let Some(email_id) = card.email_id() {
            self.storage.insert(ExclusionSet::ProcessedEmails, email_id);
        }
        true
    }
}
