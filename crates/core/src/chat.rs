mod builder;
mod error;
mod mailbox;
mod scheduler;
mod state;

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::conversation::Conversation;
use crate::transcript::{Entry, EntryId, ViewMode};
pub use builder::ChatBuilder;
pub use error::ChatClosedError;
pub use mailbox::Command;
use mailbox::{Envelope, Mailbox, MailboxParts, Report};
use scheduler::run_chat;
use state::ChatState;
pub use state::TurnStage;

/// Handle to a running chat session.
///
/// The session lives in its own task and reacts to [`Command`]s one at
/// a time. It owns the conversation, the rendered transcript and the
/// input box; the handle only sends commands to it. Handles are cheap to
/// clone, and the session ends when the last handle is dropped.
///
/// Only one turn runs at a time. Submissions that arrive while a turn
/// is in flight are ignored, and so are blank ones.
pub struct Chat {
    mailbox: Arc<Mailbox>,
}

impl Chat {
    /// Sends a command to the session.
    #[inline]
    pub fn dispatch(&self, cmd: Command) -> Result<(), ChatClosedError> {
        self.mailbox.send(Envelope::Command(cmd))
    }

    /// Types `text` into the input box and submits it.
    #[inline]
    pub fn send_message<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), ChatClosedError> {
        self.dispatch(Command::Send(text.into()))
    }

    /// Replaces the text in the input box without submitting it.
    #[inline]
    pub fn input<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), ChatClosedError> {
        self.dispatch(Command::Input(text.into()))
    }

    /// Submits the text in the input box.
    #[inline]
    pub fn submit(&self) -> Result<(), ChatClosedError> {
        self.dispatch(Command::Submit)
    }

    /// Picks a quick-prompt card by index.
    #[inline]
    pub fn pick_prompt(&self, idx: usize) -> Result<(), ChatClosedError> {
        self.dispatch(Command::PickPrompt(idx))
    }

    /// Clears the conversation and goes back to the welcome screen.
    ///
    /// A turn in flight is abandoned; its reply never shows up.
    #[inline]
    pub fn new_chat(&self) -> Result<(), ChatClosedError> {
        self.dispatch(Command::NewChat)
    }

    /// Returns a copy of the session state once all previously sent
    /// commands have been handled.
    pub async fn snapshot(&self) -> Result<Snapshot, ChatClosedError> {
        let (tx, rx) = oneshot::channel();
        self.dispatch(Command::Inspect(tx))?;
        rx.await.map_err(|_| ChatClosedError)
    }

    /// Attempts to stop the session.
    ///
    /// The session is not guaranteed to stop immediately, but it will
    /// not handle further commands.
    #[inline]
    pub fn close(&self) {
        self.mailbox.try_kill();
    }
}

impl Chat {
    fn spawn(state: ChatState) -> Self {
        let MailboxParts {
            mailbox,
            msg_rx,
            kill_rx,
        } = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            run_chat(Arc::downgrade(&mailbox), state, msg_rx, kill_rx)
                .instrument(trace_span!("chat")),
        );
        Self { mailbox }
    }

    #[inline]
    fn from_mailbox(mailbox: Arc<Mailbox>) -> Self {
        Self { mailbox }
    }

    #[inline]
    fn report(&self, report: Report) -> Result<(), ChatClosedError> {
        self.mailbox.send(Envelope::Report(report))
    }
}

impl Clone for Chat {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}

/// A copy of the session state at one point in time.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// The turn stage.
    pub stage: TurnStage,
    /// The visible screen.
    pub view: ViewMode,
    /// Completed messages.
    pub conversation: Conversation,
    /// Rendered entries, placeholder included.
    pub entries: Vec<Entry>,
    /// The entry the view is scrolled to.
    pub scroll_anchor: Option<EntryId>,
    /// Text in the input box.
    pub draft: String,
    /// Whether the send button is enabled.
    pub submit_enabled: bool,
}
