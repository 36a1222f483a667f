use std::sync::Weak;

use tokio::select;
use tokio::sync::{mpsc, watch};

use super::Chat;
use super::mailbox::{Envelope, Mailbox};
use super::state::ChatState;

pub(crate) async fn run_chat(
    mailbox: Weak<Mailbox>,
    mut state: ChatState,
    mut msg_rx: mpsc::UnboundedReceiver<Envelope>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    loop {
        let envelope = select! {
            biased;

            _ = kill_rx.changed() => {
                break;
            }
            envelope = msg_rx.recv() => {
                let Some(envelope) = envelope else {
                    break;
                };
                envelope
            }
        };
        trace!("received: {envelope:?}");

        let Some(mailbox) = mailbox.upgrade() else {
            warn!("last chat handle has been dropped, discard the message");
            break;
        };
        let handle_span = trace_span!("handle");
        handle_span.in_scope(|| {
            state.handle(envelope, &Chat::from_mailbox(mailbox));
            trace!("finished");
        });
    }
    state.shutdown();
    debug!("will terminate");
}
