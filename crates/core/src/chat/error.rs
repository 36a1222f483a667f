use std::error::Error;
use std::fmt;

/// A type of error which can be returned whenever commands are sent to
/// a chat whose task has terminated.
pub struct ChatClosedError;

impl fmt::Debug for ChatClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClosedError").finish()
    }
}

impl fmt::Display for ChatClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the chat has been closed".fmt(f)
    }
}

impl Error for ChatClosedError {}
