//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = TraghettoError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum TraghettoError {
    InvalidFormat(InvalidFormatError),
    InvalidArgument(InvalidArgumentError),
    IOError(std::io::Error),
}

impl TraghettoError {
    pub(crate) fn invalid_format<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for TraghettoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidFormat(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for TraghettoError {}

/// Error used when a corpus line does not follow the `word/tag` format.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}", self.msg)
    }
}

impl Error for InvalidFormatError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<std::io::Error> for TraghettoError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
