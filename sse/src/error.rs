//! Error types for the `sse` crate.
//!
//! Follows the same pattern as the other layers: a root `Error` struct holding
//! an `error_kind` and an optional `source` for error chaining.

use std::error::Error as StdError;
use std::fmt;
use std::io;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Kinds of errors produced while delivering events.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// Writing an encoded record to the sink failed.
    Io,
    /// The transport can't flush a response incrementally.
    StreamingUnsupported,
}

impl Error {
    pub fn streaming_unsupported() -> Self {
        Self {
            source: None,
            error_kind: ErrorKind::StreamingUnsupported,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.error_kind, &self.source) {
            (ErrorKind::Io, Some(source)) => write!(f, "write event: {source}"),
            (ErrorKind::Io, None) => write!(f, "write event"),
            (ErrorKind::StreamingUnsupported, _) => write!(f, "streaming unsupported"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_source() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "connection closed").into();

        assert_eq!(err.error_kind, ErrorKind::Io);
        assert_eq!(err.to_string(), "write event: connection closed");
        assert!(err.source().is_some(), "io error should be chained as source");
    }

    #[test]
    fn test_streaming_unsupported_message() {
        let err = Error::streaming_unsupported();

        assert_eq!(err.error_kind, ErrorKind::StreamingUnsupported);
        assert_eq!(err.to_string(), "streaming unsupported");
        assert!(err.source().is_none());
    }
}
