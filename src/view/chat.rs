//! The chat panel

/// A chat bubble
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    text: String,
    from_user: bool,
}

impl ChatMessage {
    pub fn text(&self) -> &str          { &self.text }
    /// User messages are right-aligned, replies are left-aligned
    pub fn is_from_user(&self) -> bool  { self.from_user }

    /// The lines of this message, as they are displayed
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    input: String,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage]   { &self.messages }
    pub fn input(&self) -> &str                { &self.input }

    pub fn set_input<S: ToString>(&mut self, input: S) {
        self.input = input.to_string();
    }

    /// Empty the input field, and return what it contained
    pub(crate) fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn push_user_message<S: ToString>(&mut self, text: S) {
        self.messages.push(ChatMessage{ text: text.to_string(), from_user: true });
    }

    pub fn push_reply<S: ToString>(&mut self, text: S) {
        self.messages.push(ChatMessage{ text: text.to_string(), from_user: false });
    }
}
