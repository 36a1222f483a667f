//! Session logic of the mock chat: the conversation, the rendered
//! transcript, the input box and the turn sequencer that ties them
//! together.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod chat;
mod composer;
pub mod conversation;
mod prompts;
pub mod render;
mod timing;
pub mod transcript;

pub use chat::{
    Chat, ChatBuilder, ChatClosedError, Command, Snapshot, TurnStage,
};
pub use prompts::{QUICK_PROMPTS, QuickPrompt};
pub use timing::TurnTiming;

/// Re-exports of [`mockseek_responder`] crate.
pub mod responder {
    pub use mockseek_responder::*;
}
