/// Lexical errors.
///
/// Raised while turning source text into tokens: malformed numbers, character
/// literals and strings, and invalid escape sequences.
pub mod lex_error;
/// Scope lookup failures.
///
/// Produced by the scope chain when a variable or function overload cannot be
/// resolved. Converted into a [`TypeError`] by the analyzer and into a
/// [`RuntimeFault`] by the evaluator.
pub mod name_error;
/// Parsing errors.
///
/// Defines everything that can go wrong while matching the token sequence
/// against the grammar, including trailing tokens after a complete source.
pub mod parse_error;
/// Runtime faults.
///
/// Dynamic rule violations raised during evaluation, such as operands of the
/// wrong kind, division by zero, or assignment to a constant.
pub mod runtime_fault;
/// Static type errors.
///
/// Violations of the static rules found by the analyzer. The first violation
/// aborts the check.
pub mod type_error;

pub use lex_error::LexError;
pub use name_error::NameError;
pub use parse_error::ParseError;
pub use runtime_fault::RuntimeFault;
pub use type_error::TypeError;

/// Any failure produced by one of the pipeline stages.
///
/// The pipeline helpers in the crate root return this so that `?` can be used
/// across lexing, parsing, checking and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token sequence does not match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program violates a static rule.
    #[error(transparent)]
    Type(#[from] TypeError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeFault),
}
