use crate::{error::NameError, interpreter::types::Type};

/// Represents every static rule violation the analyzer reports.
///
/// Offsets are character offsets of the node that broke the rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A declared type name does not name a known type.
    #[error("Error at offset {offset}: Unknown type '{name}'.")]
    UnknownType {
        /// The type name as written.
        name:   String,
        /// Character offset of the declaration.
        offset: usize,
    },
    /// A value of type `found` was used where `expected` is required.
    #[error("Error at offset {offset}: Type '{found}' is not assignable to '{expected}'.")]
    NotAssignable {
        /// The required type.
        expected: Type,
        /// The type of the value.
        found:    Type,
        /// Character offset of the value.
        offset:   usize,
    },
    /// A constant field was declared without an initial value.
    #[error("Error at offset {offset}: Constant '{name}' must be initialized.")]
    UninitializedConstant {
        /// Name of the constant.
        name:   String,
        /// Character offset of the field.
        offset: usize,
    },
    /// A declaration has neither a type nor an initializer.
    #[error("Error at offset {offset}: Declaration of '{name}' needs a type or an initial value.")]
    UntypedDeclaration {
        /// Name of the declared variable.
        name:   String,
        /// Character offset of the declaration.
        offset: usize,
    },
    /// A method without a return type contains a `RETURN`.
    #[error("Error at offset {offset}: Method '{method}' returns a value but declares no return type.")]
    MissingReturnType {
        /// Name of the method.
        method: String,
        /// Character offset of the return value.
        offset: usize,
    },
    /// An `IF` statement without statements in its then-branch.
    #[error("Error at offset {offset}: An IF statement needs at least one statement.")]
    EmptyThenBranch {
        /// Character offset of the condition.
        offset: usize,
    },
    /// The left side of an assignment is not an access expression.
    #[error("Error at offset {offset}: Only variables and fields can be assigned.")]
    InvalidAssignmentTarget {
        /// Character offset of the receiver.
        offset: usize,
    },
    /// The two sides of an assignment have different types.
    #[error("Error at offset {offset}: Cannot assign a '{value}' to a '{target}'.")]
    AssignmentMismatch {
        /// Type of the receiver.
        target: Type,
        /// Type of the assigned value.
        value:  Type,
        /// Character offset of the receiver.
        offset: usize,
    },
    /// An assignment targets a constant.
    #[error("Error at offset {offset}: Cannot assign to constant '{name}'.")]
    ConstantAssignment {
        /// Name of the constant.
        name:   String,
        /// Character offset of the receiver.
        offset: usize,
    },
    /// Arithmetic between operands that are not the same numeric type.
    #[error("Error at offset {offset}: Operator '{operator}' cannot combine '{left}' and '{right}'.")]
    ArithmeticMismatch {
        /// The operator as written.
        operator: &'static str,
        /// Type of the left operand.
        left:     Type,
        /// Type of the right operand.
        right:    Type,
        /// Character offset of the binary expression.
        offset:   usize,
    },
    /// An integer literal outside of the signed 32-bit range.
    #[error("Error at offset {offset}: Integer literal {literal} is out of range.")]
    IntegerOutOfRange {
        /// The literal value.
        literal: String,
        /// Character offset of the literal.
        offset:  usize,
    },
    /// A decimal literal larger in magnitude than the largest finite double.
    #[error("Error at offset {offset}: Decimal literal {literal} is out of range.")]
    DecimalOutOfRange {
        /// The literal value.
        literal: String,
        /// Character offset of the literal.
        offset:  usize,
    },
    /// A grouping that does not wrap a binary expression.
    #[error("Error at offset {offset}: Only binary expressions may be grouped.")]
    InvalidGroup {
        /// Character offset of the group.
        offset: usize,
    },
    /// A name, overload or member table could not be resolved.
    #[error("Error at offset {offset}: {source}")]
    Unresolved {
        /// The failed lookup.
        source: NameError,
        /// Character offset of the access or call.
        offset: usize,
    },
    /// No zero-argument `main` returning `Integer` exists.
    #[error("A zero-argument 'main' method returning Integer must be defined.")]
    MissingMain,
}

impl TypeError {
    /// Attaches a location to a failed scope lookup.
    #[must_use]
    pub const fn unresolved(source: NameError, offset: usize) -> Self {
        Self::Unresolved { source, offset }
    }
}
