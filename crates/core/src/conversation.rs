//! Conversation-related types.

use chrono::{DateTime, Local};

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person typing into the input box.
    User,
    /// The mock assistant.
    Assistant,
}

/// A message exchanged in a turn.
///
/// Messages are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    timestamp: DateTime<Local>,
}

impl Message {
    #[inline]
    pub(crate) fn new(
        role: Role,
        content: String,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            role,
            content,
            timestamp,
        }
    }

    /// Returns the author of this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of this message.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the wall-clock time at which the message was rendered.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// The messages of the current session, in the order they were sent.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Returns all messages.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been sent yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the latest message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[inline]
    pub(crate) fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Formats a timestamp as `HH:MM`, the way message bubbles show it.
pub fn format_time(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%H:%M").to_string()
}
