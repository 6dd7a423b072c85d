use std::{error::Error, fmt::Display, io};

/// Errors that may occur when reading a frame from a stream.
#[derive(Debug)]
pub enum ReadError {
    IoError(io::Error),
    /// The byte found where the start-of-frame marker was expected.
    UnexpectedSof(u8),
    /// A length field that does not describe a valid frame.
    InvalidLength(u8),
    ChecksumMismatch { expected: u8, actual: u8 },
}

impl From<io::Error> for ReadError {
    fn from(value: io::Error) -> Self {
        ReadError::IoError(value)
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::IoError(error) => write!(f, "{}", error),
            ReadError::UnexpectedSof(byte) => {
                write!(f, "Expected start of frame (fe), found {:02x}", byte)
            }
            ReadError::InvalidLength(len) => {
                write!(f, "Invalid length field {:02x}", len)
            }
            ReadError::ChecksumMismatch { expected, actual } => write!(
                f,
                "Frame check sequence mismatch: expected {:02x}, received {:02x}",
                expected, actual
            ),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::IoError(error) => Some(error),
            _ => None,
        }
    }
}

/// Errors that may occur when building a request frame from text tokens.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    InvalidHex(String),
    MissingArguments { got: usize },
    PayloadTooLong { max: usize, got: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidHex(token) => {
                write!(f, "Invalid hex byte '{}'", token)
            }
            ParseError::MissingArguments { got } => write!(
                f,
                "Expected a subsystem and a command id, but got {} value(s)",
                got
            ),
            ParseError::PayloadTooLong { max, got } => {
                write!(f, "Payload too large! Maximum is {}, but got {}", max, got)
            }
        }
    }
}

impl Error for ParseError {}
