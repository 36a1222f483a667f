use mockseek_responder::RevealFrame;
use tokio::sync::{mpsc, oneshot, watch};

use super::{ChatClosedError, Snapshot};

/// An action taken in the UI.
#[derive(Debug)]
pub enum Command {
    /// The text in the input box changed.
    Input(String),
    /// The send button was clicked, or Enter was pressed.
    Submit,
    /// Replaces the input text and submits it at once.
    Send(String),
    /// A quick-prompt card was clicked. Carries the card index in
    /// [`QUICK_PROMPTS`](crate::QUICK_PROMPTS).
    PickPrompt(usize),
    /// The "new chat" button was clicked.
    NewChat,
    /// Asks for a copy of the current state.
    Inspect(oneshot::Sender<Snapshot>),
}

/// Progress reported by the tasks of a turn. `turn` is the number of
/// the turn that spawned the task.
#[derive(Debug)]
pub(crate) enum Report {
    ThinkingElapsed { turn: u64 },
    RevealProgress { turn: u64, frame: RevealFrame },
    RevealFinished { turn: u64 },
    TaskEnded(u64),
}

#[derive(Debug)]
pub(crate) enum Envelope {
    Command(Command),
    Report(Report),
}

pub(crate) struct MailboxParts {
    pub mailbox: Mailbox,
    pub msg_rx: mpsc::UnboundedReceiver<Envelope>,
    pub kill_rx: watch::Receiver<bool>,
}

pub(crate) struct Mailbox {
    msg_tx: mpsc::UnboundedSender<Envelope>,
    kill_tx: watch::Sender<bool>,
}

impl Mailbox {
    #[inline]
    pub fn new() -> MailboxParts {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        MailboxParts {
            mailbox: Mailbox { msg_tx, kill_tx },
            msg_rx,
            kill_rx,
        }
    }

    #[inline]
    pub fn send(&self, envelope: Envelope) -> Result<(), ChatClosedError> {
        self.msg_tx.send(envelope).map_err(|_| ChatClosedError)
    }

    #[inline]
    pub fn try_kill(&self) {
        self.kill_tx.send(true).ok();
    }
}
