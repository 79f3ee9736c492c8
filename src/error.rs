/*!
Conversion errors.
*/
use std::fmt;
use std::io;

/**
Result of a strict conversion.
*/
pub type Result<T> = ::std::result::Result<T, ConversionError>;

/**
Which way a conversion was going when it failed.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// UTF-8 to wide (UTF-16).
    Widen,
    /// Wide (UTF-16) to UTF-8.
    Narrow,
}

impl fmt::Display for Direction {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Direction::Widen => write!(fmt, "utf8 to wide-string"),
            Direction::Narrow => write!(fmt, "wide-string to utf8"),
        }
    }
}

/**
A strict conversion rejected its input.

Lossy conversions never produce this error.  The `InvalidUtf8At` and `InvalidUtf16At` variants carry the offset (in input units) of the first offending unit; the Win32 backend cannot report offsets and yields `Platform` instead.
*/
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("utf8 to wide-string conversion failed: invalid unit at offset {0}")]
    InvalidUtf8At(usize),

    #[error("wide-string to utf8 conversion failed: unpaired surrogate at offset {0}")]
    InvalidUtf16At(usize),

    #[error("{direction} conversion failed: {len} units exceeds the conversion limit")]
    TooLong { direction: Direction, len: usize },

    #[error("{direction} conversion failed (os error {code})")]
    Platform { direction: Direction, code: i32 },
}

impl ConversionError {
    /**
    Returns the direction of the failed conversion.
    */
    pub fn direction(&self) -> Direction {
        match *self {
            ConversionError::InvalidUtf8At(_) => Direction::Widen,
            ConversionError::InvalidUtf16At(_) => Direction::Narrow,
            ConversionError::TooLong { direction, .. }
            | ConversionError::Platform { direction, .. } => direction,
        }
    }
}

impl From<ConversionError> for io::Error {
    fn from(err: ConversionError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
