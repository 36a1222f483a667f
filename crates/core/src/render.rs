//! Events describing how the rendered view changes.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::transcript::{Entry, EntryId};

/// A change to the rendered view.
///
/// Front-ends receive these in order and apply them to whatever they
/// draw. Replaying all events from the start reproduces the current
/// transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    /// The transcript is hidden and the welcome screen is shown.
    WelcomeShown,
    /// The welcome screen is hidden and the transcript is shown.
    MessagesShown,
    /// An entry was appended at the bottom of the transcript.
    EntryAppended(Entry),
    /// An entry was removed.
    EntryRemoved(EntryId),
    /// The bubble text of an entry was replaced.
    TextChanged {
        /// The entry being updated.
        id: EntryId,
        /// The full text now shown in the bubble.
        text: String,
    },
    /// A timestamp was attached to an entry.
    TimestampSet {
        /// The entry being updated.
        id: EntryId,
        /// The attached timestamp.
        timestamp: DateTime<Local>,
    },
    /// All entries were removed.
    Cleared,
    /// Whether submitting the input is currently possible.
    SubmitStateChanged(bool),
}

type RenderFn = Arc<dyn Fn(&RenderEvent) + Send + Sync>;

/// A cloneable sink for [`RenderEvent`]s.
#[derive(Clone, Default)]
pub(crate) struct Renderer {
    render_fn: Option<RenderFn>,
}

impl Renderer {
    #[inline]
    pub fn new(
        render_fn: impl Fn(&RenderEvent) + Send + Sync + 'static,
    ) -> Self {
        Self {
            render_fn: Some(Arc::new(render_fn)),
        }
    }

    #[inline]
    pub fn emit(&self, event: RenderEvent) {
        trace!("render: {event:?}");
        if let Some(render_fn) = &self.render_fn {
            render_fn(&event);
        }
    }
}

impl Debug for Renderer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("attached", &self.render_fn.is_some())
            .finish()
    }
}
