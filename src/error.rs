use std::{fmt::Display, io, num::{ParseFloatError, ParseIntError}};

use bincode::ErrorKind;
use serde::{de, ser};

/// Custom Result type for sqlcrud operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sqlcrud
///
/// Statement validation never produces these; its failures are reported
/// inside the returned `Attribute`.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Literal parsing error
    Parse(String),
    /// Internal error (serialization, snapshot I/O, etc.)
    Internal(String),
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<ParseFloatError> for Error {
    fn from(value: ParseFloatError) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<Box<ErrorKind>> for Error {
    fn from(value: Box<ErrorKind>) -> Self {
        Error::Internal(value.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Internal(value.to_string())
    }
}

impl std::error::Error for Error {}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Internal(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Internal(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error {}", err),
            Error::Internal(err) => write!(f, "internal error {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_conversions() {
        let err: Error = "abc".parse::<i64>().unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err, Error::Internal("gone".to_string()));
        assert_eq!(err.to_string(), "internal error gone");
    }
}
