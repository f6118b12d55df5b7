/// Represents all errors that can occur while parsing a token sequence.
///
/// Offsets point at the offending token, or at the end of the last token when
/// the input ended too early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Found a token that does not fit the grammar at this point.
    #[error("Error at offset {offset}: Expected {expected}, found '{found}'.")]
    UnexpectedToken {
        /// Description of what the grammar required.
        expected: String,
        /// Literal text of the token that was found.
        found:    String,
        /// Character offset of the token.
        offset:   usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error at offset {offset}: Expected {expected}, found end of input.")]
    UnexpectedEndOfInput {
        /// Description of what the grammar required.
        expected: String,
        /// Character offset of the end of input.
        offset:   usize,
    },
    /// Parentheses wrap something other than a binary expression.
    #[error("Error at offset {offset}: Only binary expressions may be grouped.")]
    InvalidGroup {
        /// Character offset of the grouped expression.
        offset: usize,
    },
    /// Tokens remain after a complete source was parsed.
    #[error("Error at offset {offset}: Unexpected trailing token '{token}'.")]
    TrailingTokens {
        /// Literal text of the first extra token.
        token:  String,
        /// Character offset of the first extra token.
        offset: usize,
    },
}

impl ParseError {
    /// Returns the character offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEndOfInput { offset, .. }
            | Self::InvalidGroup { offset }
            | Self::TrailingTokens { offset, .. } => *offset,
        }
    }
}
