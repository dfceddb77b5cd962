//! The suggestion feed

use uuid::Uuid;

use crate::suggestion::SuggestionCard;

/// What the suggestion feed currently shows
#[derive(Clone, Debug, PartialEq)]
pub enum FeedState {
    /// Suggestions have never been requested
    Idle,
    Loading,
    Cards(Vec<SuggestionCard>),
    /// The server had nothing to suggest
    NoSuggestions,
    /// Every suggestion of the server was filtered out
    NoNewSuggestions,
    Failed(String),
}

impl FeedState {
    /// The text shown in place of the cards
    pub fn placeholder(&self) -> Option<String> {
        match self {
            FeedState::Idle => None,
            FeedState::Cards(_) => None,
            FeedState::Loading => Some("Loading suggestions...".to_string()),
            FeedState::NoSuggestions => Some("No suggestions found based on your interests".to_string()),
            FeedState::NoNewSuggestions => Some("No new suggestions found".to_string()),
            FeedState::Failed(msg) => Some(format!("Failed to load suggestions: {}", msg)),
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        FeedState::Idle
    }
}


#[derive(Clone, Debug, Default)]
pub struct SuggestionFeed {
    state: FeedState,
}

impl SuggestionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn set_state(&mut self, state: FeedState) {
        self.state = state;
    }

    /// The cards currently displayed (empty while a placeholder is shown)
    pub fn cards(&self) -> &[SuggestionCard] {
        match &self.state {
            FeedState::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn card(&self, id: Uuid) -> Option<&SuggestionCard> {
        self.cards().iter().find(|card| card.id() == id)
    }

    pub fn remove_card(&mut self, id: Uuid) -> Option<SuggestionCard> {
        match &mut self.state {
            FeedState::Cards(cards) => {
                let index = cards.iter().position(|card| card.id() == id)?;
                Some(cards.remove(index))
            },
            _ => None,
        }
    }
}
