//! Codec error type.

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    /// A serialized value has no JSON counterpart.
    #[error("unsupported value kind: {0}")]
    UnsupportedValueKind(&'static str),
    /// A string escape other than `\\`, `\"`, `\r` or `\n`.
    #[error("unexpected escape character {found:?} at byte {position}")]
    UnexpectedEscapeCharacter { position: usize, found: char },
    /// Unrecognized character, misplaced structural token or truncated input.
    #[error("malformed JSON at byte {0}")]
    MalformedInput(usize),
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("deserialize error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

impl JsonError {
    /// Byte offset in the input the error refers to, when it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            JsonError::UnexpectedEscapeCharacter { position, .. } => Some(*position),
            JsonError::MalformedInput(position) => Some(*position),
            _ => None,
        }
    }
}

impl serde::ser::Error for JsonError {
    fn custom<T: Display>(msg: T) -> Self {
        JsonError::Custom(msg.to_string())
    }
}
