//! Ordered message log for a single session.

use crate::Message;

/// Chronological message history of one session.
///
/// `append` and `clear` are the only mutators; messages are never
/// reordered or edited in place.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    messages: Vec<Message>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append messages at the tail, preserving their order.
    pub fn append(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Flatten the history into model context: one `<prefix><content>\n`
    /// line per message, where the prefix comes from the speaker role.
    pub fn render(&self) -> String {
        let capacity = self
            .messages
            .iter()
            .map(|m| m.role().prefix().len() + m.content().len() + 1)
            .sum();
        let mut text = String::with_capacity(capacity);
        for message in &self.messages {
            text.push_str(message.role().prefix());
            text.push_str(message.content());
            text.push('\n');
        }
        text
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
