/// Represents all errors that can occur while tokenizing source text.
///
/// Every variant carries the character offset of the first character that
/// could neither extend nor start a valid token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("Error at offset {offset}: Unexpected character.")]
    UnexpectedCharacter {
        /// Character offset of the offending character.
        offset: usize,
    },
    /// A `0` directly followed by another digit.
    #[error("Error at offset {offset}: Numbers may not have leading zeros.")]
    LeadingZero {
        /// Character offset of the digit following the zero.
        offset: usize,
    },
    /// A `.` after an integer that is not followed by a digit.
    #[error("Error at offset {offset}: Expected a digit after the decimal point.")]
    MissingFraction {
        /// Character offset right after the `.`.
        offset: usize,
    },
    /// A character literal that is empty, holds more than one character or is
    /// never closed.
    #[error("Error at offset {offset}: Invalid character literal.")]
    InvalidCharacter {
        /// Character offset where the closing quote was expected.
        offset: usize,
    },
    /// A string literal that reaches a line break or the end of input.
    #[error("Error at offset {offset}: Unterminated string literal.")]
    UnterminatedString {
        /// Character offset of the line break or end of input.
        offset: usize,
    },
    /// A backslash followed by a character that is not a known escape code.
    #[error("Error at offset {offset}: Invalid escape sequence.")]
    InvalidEscape {
        /// Character offset of the character after the backslash.
        offset: usize,
    },
}

impl LexError {
    /// Returns the character offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { offset }
            | Self::LeadingZero { offset }
            | Self::MissingFraction { offset }
            | Self::InvalidCharacter { offset }
            | Self::UnterminatedString { offset }
            | Self::InvalidEscape { offset } => *offset,
        }
    }
}
