//! A mock chat assistant that answers from a table of canned replies.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to drive the mock session from your own front-end.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod input;
mod session;
pub mod view;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`mockseek_core`] crate.
pub mod core {
    pub use mockseek_core::*;
}
