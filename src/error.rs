use std::fmt;

use thiserror::Error;

/// Ways a flatten run can fail on user input or IO.
///
/// Structural bugs in a token source (keys set while one is pending,
/// closes past the root) are not represented here; those are contract
/// violations and fail fast instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("object key expected")]
    KeyExpected,
    #[error("colon expected after object key")]
    ColonExpected,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("invalid UTF-8 in string literal")]
    InvalidUtf8,
    #[error("unescaped control character in string literal")]
    BareControlChar,
    #[error("unexpected data after top-level value")]
    TrailingData,
    #[error("io error: {0}")]
    Io(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenError {
    pub kind: FlattenErrorKind,
    /// Absolute byte offset in the input where the error was detected.
    /// Zero for sink write failures, which have no input position.
    pub position: usize,
}

impl FlattenError {
    pub fn new(kind: FlattenErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub(crate) fn io(err: std::io::Error, position: usize) -> Self {
        Self::new(FlattenErrorKind::Io(err.to_string()), position)
    }
}

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)
    }
}

impl std::error::Error for FlattenError {}
