use std::{error::Error as StdError, fmt::Display, io};

use znp_protocol::error::ReadError;

/// Errors that end a request.
#[derive(Debug)]
pub enum Error {
    /// The device could not be opened or reopened.
    Open(io::Error),
    Io(io::Error),
    Read(ReadError),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<ReadError> for Error {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::IoError(error) => Error::Io(error),
            other => Error::Read(other),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Open(error) => write!(f, "Unable to open device: {}", error),
            Error::Io(error) => write!(f, "{}", error),
            Error::Read(error) => write!(f, "{}", error),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Open(error) | Error::Io(error) => Some(error),
            Error::Read(error) => Some(error),
        }
    }
}
