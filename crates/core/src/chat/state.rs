use std::collections::HashMap;
use std::pin::pin;
use std::sync::Arc;

use chrono::Local;
use futures_util::StreamExt;
use mockseek_responder::{Responder, Reveal, RevealFrame};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::Instrument;

use super::mailbox::{Command, Envelope, Report};
use super::{Chat, Snapshot};
use crate::composer::Composer;
use crate::conversation::{Conversation, Message, Role};
use crate::prompts::QUICK_PROMPTS;
use crate::render::Renderer;
use crate::timing::TurnTiming;
use crate::transcript::{EntryId, Transcript};

/// Where the chat is in the turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurnStage {
    /// Waiting for the user. Sends are accepted.
    #[default]
    Idle,
    /// The "thinking" placeholder is shown.
    Thinking,
    /// The reply is being revealed.
    Revealing,
}

enum Phase {
    Thinking { placeholder: EntryId },
    Revealing { entry: EntryId, reply: String },
}

struct PendingTurn {
    turn: u64,
    input: String,
    phase: Phase,
}

pub(crate) struct ChatState {
    responder: Arc<dyn Responder>,
    timing: TurnTiming,
    assistant_name: String,
    conversation: Conversation,
    transcript: Transcript,
    composer: Composer,
    pending: Option<PendingTurn>,
    last_turn: u64,
    running_tasks: HashMap<u64, JoinHandle<()>>,
    next_task_id: u64,

    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChatState {
    pub fn new(
        responder: Arc<dyn Responder>,
        timing: TurnTiming,
        assistant_name: String,
        renderer: Renderer,
        on_idle: Option<Box<dyn Fn() + Send + Sync>>,
    ) -> Self {
        Self {
            responder,
            timing,
            assistant_name,
            conversation: Default::default(),
            transcript: Transcript::new(renderer.clone()),
            composer: Composer::new(renderer),
            pending: None,
            last_turn: 0,
            running_tasks: Default::default(),
            next_task_id: 1,
            on_idle,
        }
    }

    pub fn handle(&mut self, envelope: Envelope, chat: &Chat) {
        match envelope {
            Envelope::Command(cmd) => self.handle_command(cmd, chat),
            Envelope::Report(report) => self.handle_report(report, chat),
        }
    }

    /// Aborts whatever is still running. Called once the chat loop has
    /// stopped.
    pub fn shutdown(&mut self) {
        for (_, task) in self.running_tasks.drain() {
            task.abort();
        }
    }

    #[inline]
    fn stage(&self) -> TurnStage {
        match &self.pending {
            None => TurnStage::Idle,
            Some(PendingTurn {
                phase: Phase::Thinking { .. },
                ..
            }) => TurnStage::Thinking,
            Some(PendingTurn {
                phase: Phase::Revealing { .. },
                ..
            }) => TurnStage::Revealing,
        }
    }

    fn handle_command(&mut self, cmd: Command, chat: &Chat) {
        match cmd {
            Command::Input(text) => self.composer.set_draft(text),
            Command::Submit => self.submit(chat),
            Command::Send(text) => {
                self.composer.set_draft(text);
                self.submit(chat);
            }
            Command::PickPrompt(idx) => {
                let Some(card) = QUICK_PROMPTS.get(idx) else {
                    debug!("no quick prompt at {idx}, ignored");
                    return;
                };
                self.composer.set_draft(card.prompt.to_owned());
                self.submit(chat);
            }
            Command::NewChat => self.start_new_chat(),
            Command::Inspect(reply_tx) => {
                reply_tx.send(self.snapshot()).ok();
            }
        }
    }

    fn handle_report(&mut self, report: Report, chat: &Chat) {
        match report {
            Report::ThinkingElapsed { turn } => {
                self.finish_thinking(turn, chat);
            }
            Report::RevealProgress { turn, frame } => {
                self.reveal_frame(turn, frame);
            }
            Report::RevealFinished { turn } => self.finish_turn(turn),
            Report::TaskEnded(task_id) => {
                if self.running_tasks.remove(&task_id).is_none() {
                    trace!("task {task_id} was aborted before it ended");
                }
            }
        }
    }

    fn submit(&mut self, chat: &Chat) {
        if self.pending.is_some() {
            // Only one turn may be in flight.
            debug!("a turn is in flight, submission ignored");
            return;
        }
        let Some(input) = self.composer.take_submission() else {
            debug!("nothing to submit");
            return;
        };

        self.transcript.show_messages();
        let now = Local::now();
        self.conversation
            .push(Message::new(Role::User, input.clone(), now));
        self.transcript
            .push_message(Role::User, input.clone(), Some(now));

        self.composer.lock();
        let placeholder = self
            .transcript
            .push_typing(format!("{} is thinking", self.assistant_name));

        self.last_turn += 1;
        let turn = self.last_turn;
        self.pending = Some(PendingTurn {
            turn,
            input,
            phase: Phase::Thinking { placeholder },
        });

        let delay = self.timing.draw_delay(&mut rand::thread_rng());
        debug!("turn {turn} started, thinking for {delay:?}");
        let chat_clone = chat.clone();
        self.spawn_task(
            async move {
                sleep(delay).await;
                chat_clone
                    .report(Report::ThinkingElapsed { turn })
                    .ok();
            }
            .instrument(trace_span!("thinking", turn)),
            chat,
        );
    }

    fn finish_thinking(&mut self, turn: u64, chat: &Chat) {
        let Some(pending) = self.pending.as_mut().filter(|p| p.turn == turn)
        else {
            debug!("stale report from turn {turn}, ignored");
            return;
        };
        let Phase::Thinking { placeholder } = pending.phase else {
            warn!("turn {turn} is not thinking");
            return;
        };

        self.transcript.remove(placeholder);
        let reply = self.responder.respond(&pending.input);
        let entry =
            self.transcript
                .push_message(Role::Assistant, String::new(), None);
        pending.phase = Phase::Revealing {
            entry,
            reply: reply.clone(),
        };

        let interval = self.timing.reveal_interval;
        let chat_clone = chat.clone();
        self.spawn_task(
            async move {
                let mut reveal = pin!(Reveal::new(reply, interval));
                while let Some(frame) = reveal.next().await {
                    if chat_clone
                        .report(Report::RevealProgress { turn, frame })
                        .is_err()
                    {
                        return;
                    }
                }
                chat_clone.report(Report::RevealFinished { turn }).ok();
            }
            .instrument(trace_span!("reveal", turn)),
            chat,
        );
    }

    fn reveal_frame(&mut self, turn: u64, frame: RevealFrame) {
        let Some(PendingTurn {
            phase: Phase::Revealing { entry, .. },
            ..
        }) = self.pending.as_ref().filter(|p| p.turn == turn)
        else {
            debug!("stale frame from turn {turn}, ignored");
            return;
        };
        let entry = *entry;
        self.transcript.set_text(entry, frame.text);
    }

    fn finish_turn(&mut self, turn: u64) {
        let Some(pending) = self.pending.take_if(|p| p.turn == turn) else {
            debug!("stale completion from turn {turn}, ignored");
            return;
        };
        let Phase::Revealing { entry, reply } = pending.phase else {
            warn!("turn {turn} finished without revealing");
            return;
        };

        let now = Local::now();
        self.transcript.set_timestamp(entry, now);
        self.conversation
            .push(Message::new(Role::Assistant, reply, now));
        self.composer.unlock();
        debug!("turn {turn} finished");

        self.notify_idle();
    }

    fn start_new_chat(&mut self) {
        let was_busy = self.pending.take().is_some();
        for (task_id, task) in self.running_tasks.drain() {
            trace!("aborting task {task_id}");
            task.abort();
        }

        self.conversation.clear();
        self.transcript.clear();
        self.composer.unlock();
        debug!("new chat started");

        if was_busy {
            self.notify_idle();
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.stage(),
            view: self.transcript.mode(),
            conversation: self.conversation.clone(),
            entries: self.transcript.entries().to_vec(),
            scroll_anchor: self.transcript.scroll_anchor(),
            draft: self.composer.draft().to_owned(),
            submit_enabled: self.composer.submit_enabled(),
        }
    }

    #[inline]
    fn notify_idle(&self) {
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn spawn_task<Fut>(&mut self, fut: Fut, chat: &Chat)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let chat = chat.clone();
        let task = tokio::spawn(async move {
            fut.await;
            chat.report(Report::TaskEnded(task_id)).ok();
        });
        self.running_tasks.insert(task_id, task);
    }
}
