use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::io;

/// The error type for building or loading a keyword table.
#[derive(Debug)]
pub enum Error {
    /// The table file could not be read.
    Io(io::Error),
    /// The table file is not a valid preset table.
    Parse(serde_json::Error),
    /// An entry has a keyword that is empty after trimming, which would
    /// match every input.
    EmptyKeyword {
        /// Position of the offending entry.
        index: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "cannot read keyword table: {err}"),
            Error::Parse(err) => {
                write!(f, "invalid keyword table: {err}")
            }
            Error::EmptyKeyword { index } => {
                write!(f, "entry #{index} has an empty keyword")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::EmptyKeyword { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    #[inline]
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}
