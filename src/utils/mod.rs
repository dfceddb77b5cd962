//! Some utility functions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::view::{ChatLog, FeedState, SuggestionFeed, TaskList};

pub mod dates;

/// The URL shapes a calendar event link can have, most specific first.
/// These are constant patterns, so compiling them cannot fail.
static EVENT_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/events/([^/]+)",
        r"eid=([^&]+)",
        r"calendar/event\?eid=([^&]+)",
    ].iter()
        .map(|pattern| Regex::new(pattern).expect("invalid event ID pattern"))
        .collect()
});

/// Extract a calendar event ID from a link to this event
pub fn extract_event_id_from_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    EVENT_ID_PATTERNS.iter()
        .filter_map(|pattern| pattern.captures(url))
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .find(|id| id.is_empty() == false)
}

/// The key two task (or suggestion) texts are compared by
pub fn dedup_key(text: &str) -> String {
    text.trim().to_lowercase()
}


/// A debug utility that pretty-prints the task list
pub fn print_task_list(tasks: &TaskList) {
    println!("TASKS ({})", tasks.len());
    for entry in tasks.iter() {
        let task = entry.task();
        let completion = if task.status().is_completed() { "✓" } else { " " };
        let synced = if task.event_id().is_some() { "=" } else { "." };
        match task.deadline() {
            Some(deadline) => println!("    {}{} {}\t📅 {}", completion, synced, task.text(), deadline),
            None => println!("    {}{} {}", completion, synced, task.text()),
        }
    }
}

/// A debug utility that pretty-prints the suggestion feed
pub fn print_suggestion_feed(feed: &SuggestionFeed) {
    match feed.state() {
        FeedState::Cards(cards) => {
            println!("SUGGESTIONS ({})", cards.len());
            for card in cards {
                let urgency = if card.is_urgent() { "!" } else { " " };
                println!("    {} {}", urgency, card.text());
                if let Some(deadline) = card.deadline() {
                    println!("        📅 {}", deadline);
                }
                if let Some(location) = card.location() {
                    println!("        📍 {}", location);
                }
                if let Some(link) = card.email_link() {
                    println!("        📧 {}", link);
                }
            }
        },
        other => {
            println!("SUGGESTIONS");
            if let Some(placeholder) = other.placeholder() {
                println!("    {}", placeholder);
            }
        },
    }
}

/// A debug utility that pretty-prints the chat messages
pub fn print_chat(chat: &ChatLog) {
    for message in chat.messages() {
        let prefix = if message.is_from_user() { ">" } else { "<" };
        for line in message.lines() {
            println!("{} {}", prefix, line);
        }
    }
}
