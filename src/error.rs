//! Error types for mask compilation and edit application
//!
//! Only two conditions are surfaced to callers: a malformed pattern and an
//! edit whose coordinates fall outside the current formatted text. Invalid
//! characters typed or pasted into a field are filtered, never raised.

use std::fmt;

/// What went wrong while compiling a mask pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A backslash at the very end of the pattern
    UnterminatedEscape,
    /// A `[` or `{` group that is never closed
    UnclosedBracket { open: char },
    /// A bracket opened while another group is still open
    NestedBracket { open: char },
    /// A `]` or `}` with no open group
    UnmatchedClosingBracket { close: char },
    /// A group opened with one bracket kind and closed with the other
    MismatchedBracket { expected: char, found: char },
    /// A character inside a group that names no slot kind
    UnknownSymbol { symbol: char },
}

/// Malformed mask pattern
///
/// `position` is the char offset into the pattern where the problem was
/// detected (for unclosed brackets, the offset of the opening bracket).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: usize,
}

impl MaskSyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for MaskSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SyntaxErrorKind::UnterminatedEscape => {
                write!(f, "unterminated escape at offset {}", self.position)
            }
            SyntaxErrorKind::UnclosedBracket { open } => {
                write!(f, "unclosed '{}' opened at offset {}", open, self.position)
            }
            SyntaxErrorKind::NestedBracket { open } => {
                write!(f, "nested '{}' at offset {}", open, self.position)
            }
            SyntaxErrorKind::UnmatchedClosingBracket { close } => {
                write!(f, "unmatched '{}' at offset {}", close, self.position)
            }
            SyntaxErrorKind::MismatchedBracket { expected, found } => write!(
                f,
                "expected '{}' but found '{}' at offset {}",
                expected, found, self.position
            ),
            SyntaxErrorKind::UnknownSymbol { symbol } => {
                write!(f, "unknown symbol '{}' at offset {}", symbol, self.position)
            }
        }
    }
}

impl std::error::Error for MaskSyntaxError {}

/// Edit coordinates outside `[0, len]` of the current formatted text,
/// or a range whose start lies after its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOutOfBounds {
    pub start: usize,
    pub end: usize,
    /// Length (in chars) of the formatted text the edit was checked against
    pub len: usize,
}

impl fmt::Display for RangeOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edit range {}..{} outside formatted text of length {}",
            self.start, self.end, self.len
        )
    }
}

impl std::error::Error for RangeOutOfBounds {}

/// Either engine error, for callers that handle both in one place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    Syntax(MaskSyntaxError),
    Range(RangeOutOfBounds),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::Syntax(e) => write!(f, "mask syntax error: {}", e),
            MaskError::Range(e) => write!(f, "range out of bounds: {}", e),
        }
    }
}

impl std::error::Error for MaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MaskError::Syntax(e) => Some(e),
            MaskError::Range(e) => Some(e),
        }
    }
}

impl From<MaskSyntaxError> for MaskError {
    fn from(e: MaskSyntaxError) -> Self {
        MaskError::Syntax(e)
    }
}

impl From<RangeOutOfBounds> for MaskError {
    fn from(e: RangeOutOfBounds) -> Self {
        MaskError::Range(e)
    }
}
