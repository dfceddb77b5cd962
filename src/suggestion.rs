//! Suggested tasks, as proposed by the server

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate task the server derived from external signals (e.g. an email)
///
/// Suggestions are never persisted. Only the IDs of the emails they came from end up in the
/// [`processed emails`](crate::storage::ExclusionSet::ProcessedEmails) set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub text: String,
    /// Human-readable deadline
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// ID of the email this suggestion was extracted from
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub is_time_sensitive: bool,
    /// Raw date string, as extracted from the source
    #[serde(default)]
    pub event_date: Option<String>,
}

impl Suggestion {
    pub fn new<S: ToString>(text: S) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}


/// A suggestion, as displayed in the suggestion feed
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionCard {
    id: Uuid,
    text: String,
    deadline: Option<String>,
    location: Option<String>,
    email_id: Option<String>,
    email_link: Option<String>,
    event_date: Option<String>,
    urgent: bool,
}

impl SuggestionCard {
    /// Build a card. `email_link_base` is prepended to the email ID to build a deep link to the email.
    pub fn new(suggestion: Suggestion, email_link_base: &str) -> Self {
        let email_id = non_empty(suggestion.email_id);
        let email_link = email_id.as_ref()
            .map(|email_id| format!("{}{}", email_link_base, email_id));

        Self {
            id: Uuid::new_v4(),
            text: suggestion.text,
            deadline: non_empty(suggestion.deadline),
            location: non_empty(suggestion.location),
            email_id,
            email_link,
            event_date: non_empty(suggestion.event_date),
            urgent: suggestion.is_time_sensitive,
        }
    }

    pub fn id(&self) -> Uuid                    { self.id }
    pub fn text(&self) -> &str                  { &self.text }
    pub fn deadline(&self) -> Option<&str>      { self.deadline.as_deref() }
    pub fn location(&self) -> Option<&str>      { self.location.as_deref() }
    pub fn email_link(&self) -> Option<&str>    { self.email_link.as_deref() }
    pub fn event_date(&self) -> Option<&str>    { self.event_date.as_deref() }
    pub fn is_urgent(&self) -> bool             { self.urgent }

    /// The ID of the source email
    pub fn email_id(&self) -> Option<&str>      { self.email_id.as_deref() }

    /// Names of the date attributes this card carries
    pub fn date_attributes(&self) -> Vec<String> {
        let mut attributes = Vec::new();
        if self.event_date.is_some() {
            attributes.push("eventDate".to_string());
        }
        if self.deadline.is_some() {
            attributes.push("deadline".to_string());
        }
        attributes
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| v.is_empty() == false)
}


#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://mail.google.com/mail/u/0/#inbox/";

    #[test]
    fn card_from_suggestion() {
        let json = r#"{"text": "Submit report", "deadline": "Friday 5pm", "location": null,
                       "email_id": "18c2f", "is_time_sensitive": true, "event_date": "2024-05-03T17:00:00"}"#;
        let suggestion: Suggestion = serde_json::from_str(json).unwrap();
        let card = SuggestionCard::new(suggestion, BASE);

        assert_eq!(card.text(), "Submit report");
        assert_eq!(card.location(), None);
        assert_eq!(card.email_link(), Some("https://mail.google.com/mail/u/0/#inbox/18c2f"));
        assert_eq!(card.email_id(), Some("18c2f"));
        assert!(card.is_urgent());
        assert_eq!(card.date_attributes(), vec!["eventDate", "deadline"]);
    }

    #[test]
    fn empty_fields_are_dropped() {
        let suggestion = Suggestion {
            text: "Water plants".to_string(),
            deadline: Some(String::new()),
            email_id: Some(String::new()),
            ..Suggestion::default()
        };
        let card = SuggestionCard::new(suggestion, BASE);
        assert_eq!(card.deadline(), None);
        assert_eq!(card.email_link(), None);
        assert_eq!(card.email_id(), None);
        assert!(card.date_attributes().is_empty());
    }

    #[test]
    fn email_id_does_not_depend_on_the_link_shape() {
        let suggestion = Suggestion {
            email_id: Some("m1".to_string()),
            ..Suggestion::new("Reply to Alice")
        };
        let card = SuggestionCard::new(suggestion, "https://mail.example.com/message/");
        assert_eq!(card.email_link(), Some("https://mail.example.com/message/m1"));
        assert_eq!(card.email_id(), Some("m1"));
    }
}
