use crate::error::NameError;

/// Represents all faults that can abort evaluation.
///
/// There is no recovery inside the language: a fault unwinds to the caller of
/// [`crate::interpreter::evaluator::core::Interpreter::run`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeFault {
    /// An operand had the wrong runtime kind for its operator.
    #[error("Operator '{operator}' cannot be applied to {left} and {right}.")]
    OperandMismatch {
        /// The operator as written.
        operator: &'static str,
        /// Kind of the left operand.
        left:     &'static str,
        /// Kind of the right operand.
        right:    &'static str,
    },
    /// A boolean was required but something else was found.
    #[error("Expected a Boolean, found {found}.")]
    ExpectedBoolean {
        /// Kind of the value that was found.
        found: &'static str,
    },
    /// The right operand of a division was zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// An assignment targeted a constant binding.
    #[error("Cannot assign to constant '{name}'.")]
    ConstantAssignment {
        /// Name of the constant.
        name: String,
    },
    /// The left side of an assignment is not an access expression.
    #[error("Only variables and fields can be assigned.")]
    InvalidAssignmentTarget,
    /// A name or overload could not be resolved.
    #[error(transparent)]
    Unresolved(#[from] NameError),
    /// A function was called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} arguments, found {found}.")]
    ArgumentCount {
        /// Name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
    },
    /// A function binding exists only as a static signature.
    #[error("Function '{name}' has no implementation.")]
    NotInvocable {
        /// Name of the function.
        name: String,
    },
    /// A method outlived the scope it was defined in.
    #[error("The defining scope of '{name}' no longer exists.")]
    ScopeExpired {
        /// Name of the method.
        name: String,
    },
    /// `main` returned something that is not a valid exit code.
    #[error("'main' must return an Integer exit code, found {found}.")]
    InvalidExitCode {
        /// Textual form of the returned value.
        found: String,
    },
    /// Writing program output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
