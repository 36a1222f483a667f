//! The rendered transcript.

use chrono::{DateTime, Local};

use crate::conversation::Role;
use crate::render::{RenderEvent, Renderer};

/// Identifies an entry in a [`Transcript`].
///
/// Identifiers are never reused within a session, not even after the
/// transcript is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

/// What an entry displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A message bubble. The timestamp is missing while the text is
    /// still being revealed.
    Message {
        /// The text shown in the bubble.
        text: String,
        /// The time shown under the bubble.
        timestamp: Option<DateTime<Local>>,
    },
    /// The transient "thinking" placeholder. It never carries a
    /// timestamp and is removed before the reply is shown.
    Typing {
        /// The text shown next to the animated dots.
        label: String,
    },
}

/// A rendering unit in the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// The identifier of this entry.
    pub id: EntryId,
    /// Decides which avatar is drawn.
    pub role: Role,
    /// The content of this entry.
    pub kind: EntryKind,
}

impl Entry {
    /// Returns `true` for the "thinking" placeholder.
    #[inline]
    pub fn is_typing(&self) -> bool {
        matches!(self.kind, EntryKind::Typing { .. })
    }

    /// Returns the bubble text, or `None` for a placeholder.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Message { text, .. } => Some(text),
            EntryKind::Typing { .. } => None,
        }
    }
}

/// Which screen is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// The welcome screen with the quick-prompt cards.
    #[default]
    Welcome,
    /// The message transcript.
    Messages,
}

/// The visible transcript, as opposed to the [`Conversation`] which
/// only holds completed messages.
///
/// Every mutation is reported through the renderer, and the view then
/// follows the newest entry.
///
/// [`Conversation`]: crate::conversation::Conversation
#[derive(Debug)]
pub(crate) struct Transcript {
    entries: Vec<Entry>,
    mode: ViewMode,
    next_id: u64,
    renderer: Renderer,
}

impl Transcript {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            entries: vec![],
            mode: ViewMode::Welcome,
            next_id: 1,
            renderer,
        }
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Returns the entry the view is scrolled to, which is always the
    /// newest one.
    #[inline]
    pub fn scroll_anchor(&self) -> Option<EntryId> {
        self.entries.last().map(|entry| entry.id)
    }

    pub fn show_messages(&mut self) {
        if self.mode == ViewMode::Messages {
            return;
        }
        self.mode = ViewMode::Messages;
        self.renderer.emit(RenderEvent::MessagesShown);
    }

    pub fn push_message(
        &mut self,
        role: Role,
        text: String,
        timestamp: Option<DateTime<Local>>,
    ) -> EntryId {
        self.push(role, EntryKind::Message { text, timestamp })
    }

    pub fn push_typing(&mut self, label: String) -> EntryId {
        self.push(Role::Assistant, EntryKind::Typing { label })
    }

    /// Removes an entry. Returns `false` if the entry is already gone.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.entries.remove(idx);
        self.renderer.emit(RenderEvent::EntryRemoved(id));
        true
    }

    /// Replaces the bubble text of a message entry.
    pub fn set_text(&mut self, id: EntryId, new_text: String) -> bool {
        let Some(EntryKind::Message { text, .. }) = self.kind_mut(id) else {
            return false;
        };
        text.clone_from(&new_text);
        self.renderer
            .emit(RenderEvent::TextChanged { id, text: new_text });
        true
    }

    /// Attaches a timestamp to a message entry.
    pub fn set_timestamp(
        &mut self,
        id: EntryId,
        new_timestamp: DateTime<Local>,
    ) -> bool {
        let Some(EntryKind::Message { timestamp, .. }) = self.kind_mut(id)
        else {
            return false;
        };
        *timestamp = Some(new_timestamp);
        self.renderer.emit(RenderEvent::TimestampSet {
            id,
            timestamp: new_timestamp,
        });
        true
    }

    /// Removes all entries and goes back to the welcome screen.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.renderer.emit(RenderEvent::Cleared);
        self.mode = ViewMode::Welcome;
        self.renderer.emit(RenderEvent::WelcomeShown);
    }

    fn push(&mut self, role: Role, kind: EntryKind) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        let entry = Entry { id, role, kind };
        self.entries.push(entry.clone());
        self.renderer.emit(RenderEvent::EntryAppended(entry));
        id
    }

    #[inline]
    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    #[inline]
    fn kind_mut(&mut self, id: EntryId) -> Option<&mut EntryKind> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.kind)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recording_transcript() -> (Transcript, Arc<Mutex<Vec<RenderEvent>>>) {
        let events = Arc::new(Mutex::new(vec![]));
        let renderer = Renderer::new({
            let events = Arc::clone(&events);
            move |event| events.lock().unwrap().push(event.clone())
        });
        (Transcript::new(renderer), events)
    }

    #[test]
    fn test_typing_placeholder() {
        let (mut transcript, events) = recording_transcript();
        transcript.show_messages();
        let user = transcript.push_message(
            Role::User,
            "Hi".to_owned(),
            Some(Local::now()),
        );
        let typing = transcript.push_typing("Bot is thinking".to_owned());
        assert_eq!(transcript.scroll_anchor(), Some(typing));
        assert!(transcript.entries()[1].is_typing());
        assert_eq!(transcript.entries()[1].text(), None);

        assert!(transcript.remove(typing));
        assert!(!transcript.remove(typing));
        assert_eq!(transcript.scroll_anchor(), Some(user));
        assert!(transcript.entries().iter().all(|entry| !entry.is_typing()));

        let events = events.lock().unwrap();
        assert_eq!(events[0], RenderEvent::MessagesShown);
        assert!(matches!(events[1], RenderEvent::EntryAppended(_)));
        assert!(matches!(events[2], RenderEvent::EntryAppended(_)));
        assert_eq!(events[3], RenderEvent::EntryRemoved(typing));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_reveal_then_timestamp() {
        let (mut transcript, events) = recording_transcript();
        let id = transcript.push_message(Role::Assistant, String::new(), None);
        assert!(transcript.set_text(id, "He".to_owned()));
        assert!(transcript.set_text(id, "Hello".to_owned()));

        let now = Local::now();
        assert!(transcript.set_timestamp(id, now));
        assert_eq!(
            transcript.entries()[0].kind,
            EntryKind::Message {
                text: "Hello".to_owned(),
                timestamp: Some(now),
            }
        );
        assert_eq!(events.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_cannot_set_text_on_placeholder() {
        let (mut transcript, _) = recording_transcript();
        let typing = transcript.push_typing("thinking".to_owned());
        assert!(!transcript.set_text(typing, "nope".to_owned()));
        assert!(!transcript.set_timestamp(typing, Local::now()));
    }

    #[test]
    fn test_clear() {
        let (mut transcript, events) = recording_transcript();
        transcript.show_messages();
        let first = transcript.push_message(Role::User, "a".to_owned(), None);
        transcript.clear();
        assert!(transcript.entries().is_empty());
        assert_eq!(transcript.mode(), ViewMode::Welcome);
        assert_eq!(transcript.scroll_anchor(), None);

        // Stale ids don't hit new entries.
        let second = transcript.push_message(Role::User, "b".to_owned(), None);
        assert_ne!(first, second);
        assert!(!transcript.remove(first));

        let events = events.lock().unwrap();
        assert!(events.contains(&RenderEvent::Cleared));
        assert!(events.contains(&RenderEvent::WelcomeShown));
    }
}
