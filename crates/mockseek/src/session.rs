use std::path::Path;

use mockseek_core::render::RenderEvent;
use mockseek_core::responder::{Error as TableError, KeywordTable};
use mockseek_core::{Chat, ChatBuilder, ChatClosedError, Snapshot, TurnTiming};

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    chat_builder: ChatBuilder,
}

impl SessionBuilder {
    /// Creates a session builder that answers from the built-in keyword
    /// table.
    #[inline]
    pub fn new() -> Self {
        Self {
            chat_builder: ChatBuilder::default(),
        }
    }

    /// Creates a session builder that answers from `table`.
    #[inline]
    pub fn with_keyword_table(table: KeywordTable) -> Self {
        Self {
            chat_builder: ChatBuilder::with_responder(table),
        }
    }

    /// Creates a session builder that answers from a keyword table
    /// stored as JSON.
    pub fn with_keyword_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, TableError> {
        let table = KeywordTable::load(path)?;
        info!("loaded {} keywords", table.len());
        Ok(Self::with_keyword_table(table))
    }

    /// Sets the delays of a turn.
    #[inline]
    pub fn with_timing(mut self, timing: TurnTiming) -> Self {
        self.chat_builder = self.chat_builder.with_timing(timing);
        self
    }

    /// Sets the name of the assistant.
    #[inline]
    pub fn with_assistant_name<S: Into<String>>(mut self, name: S) -> Self {
        self.chat_builder = self.chat_builder.with_assistant_name(name);
        self
    }

    /// Attaches a callback to be invoked for every change to the view.
    #[inline]
    pub fn on_render(
        mut self,
        on_render: impl Fn(&RenderEvent) + Send + Sync + 'static,
    ) -> Self {
        self.chat_builder = self.chat_builder.on_render(on_render);
        self
    }

    /// Attaches a callback to be invoked when the session is idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.chat_builder = self.chat_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        Session {
            chat: self.chat_builder.build(),
        }
    }
}

impl Default for SessionBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// A chat session, like a window that displays messages and has an
/// input box.
///
/// This is basically a wrapper around [`Chat`].
pub struct Session {
    chat: Chat,
}

impl Session {
    /// Sends a message to the session.
    #[inline]
    pub fn send_message(&self, message: &str) -> Result<(), ChatClosedError> {
        self.chat.send_message(message)
    }

    /// Replaces the text in the input box.
    #[inline]
    pub fn input(&self, text: &str) -> Result<(), ChatClosedError> {
        self.chat.input(text)
    }

    /// Submits the text in the input box.
    #[inline]
    pub fn submit(&self) -> Result<(), ChatClosedError> {
        self.chat.submit()
    }

    /// Sends the prompt of a quick-prompt card.
    #[inline]
    pub fn pick_prompt(&self, idx: usize) -> Result<(), ChatClosedError> {
        self.chat.pick_prompt(idx)
    }

    /// Starts over with an empty conversation.
    #[inline]
    pub fn new_chat(&self) -> Result<(), ChatClosedError> {
        self.chat.new_chat()
    }

    /// Returns a copy of the session state.
    #[inline]
    pub async fn snapshot(&self) -> Result<Snapshot, ChatClosedError> {
        self.chat.snapshot().await
    }

    /// Returns the underlying chat.
    #[inline]
    pub fn chat(&self) -> &Chat {
        &self.chat
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.chat.close();
    }
}
