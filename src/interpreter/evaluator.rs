/// Core evaluation logic and the interpreter entry point.
///
/// Contains the `Interpreter`, control flow signalling and the dispatch over
/// expression kinds.
pub mod core;

/// Execution of statements.
///
/// Declarations, assignments, branches and loops, each body in its own child
/// scope.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Short-circuit logic, arithmetic, string concatenation, ordering and
/// equality.
pub mod binary;

/// Function evaluation.
///
/// Resolution of calls and receivers, argument binding and invocation of host
/// functions and program methods.
pub mod function;
