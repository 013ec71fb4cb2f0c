use std::io;

use thiserror::Error;

/// Reasons a git url is rejected before any connection is attempted.
#[derive(Debug, Error, PartialEq)]
pub enum UrlError {
    #[error("empty")]
    Empty,
    #[error("invalid git url format: {0:?}")]
    TooFewParts(String),
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse git url: {0}")]
    InvalidUrl(#[from] UrlError),
    #[error("connection to {addr} timed out")]
    Timeout { addr: String },
    #[error("socket error communicating with {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("remote error: {0}")]
    Remote(String),
}

impl Error {
    /// Classify an I/O failure on the connection to `addr`.
    pub(crate) fn from_io(addr: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout {
                addr: addr.to_owned(),
            },
            _ => Error::Connection {
                addr: addr.to_owned(),
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_classification() {
        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "slow");
        assert!(matches!(
            Error::from_io("h:1", timed_out),
            Error::Timeout { .. }
        ));

        let would_block = io::Error::new(io::ErrorKind::WouldBlock, "again");
        assert!(matches!(
            Error::from_io("h:1", would_block),
            Error::Timeout { .. }
        ));

        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "nope");
        match Error::from_io("h:1", refused) {
            Error::Connection { addr, source } => {
                assert_eq!(addr, "h:1");
                assert_eq!(source.kind(), io::ErrorKind::ConnectionRefused);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_url_error_converts() {
        let err: Error = UrlError::Empty.into();
        assert!(matches!(err, Error::InvalidUrl(UrlError::Empty)));
        assert_eq!(err.to_string(), "failed to parse git url: empty");
    }
}
