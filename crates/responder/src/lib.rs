//! Canned replies for the mock assistant.
//!
//! Nothing in this crate understands the user. A [`KeywordTable`] maps
//! lowercase keywords to pre-authored responses, and the first keyword
//! found in the input decides the reply. A [`Reveal`] then discloses the
//! reply one character at a time, so that the front-end can animate it
//! as if it were being generated.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod preset;
mod reveal;
mod table;

pub use error::Error;
pub use preset::{PresetEntry, PresetTable};
pub use reveal::{Reveal, RevealFrame};
pub use table::{KeywordTable, KeywordTableBuilder, Responder};
