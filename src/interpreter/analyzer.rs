/// The analyzer itself: program entry, fields and methods.
///
/// Owns the `TypeResult` alias and the whole-program rule that a `main`
/// method must exist.
pub mod core;

/// Static rules for statements.
///
/// Declarations, assignments and the scoping of `IF`, `FOR` and `WHILE`
/// bodies, plus return type checks.
pub mod statement;

/// Static typing of expressions.
///
/// Literal ranges, operator typing, and resolution of names, members and
/// function overloads.
pub mod expression;
