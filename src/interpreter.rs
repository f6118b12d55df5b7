/// The analyzer module statically checks parsed programs.
///
/// The analyzer walks the AST once, resolves every name against a chain of
/// scopes, computes the static type of every expression and enforces the
/// typing rules of the language before anything runs.
///
/// # Responsibilities
/// - Resolves variables, overloads and member tables, recording the bindings
///   in the tree.
/// - Enforces assignability, constant protection and return types.
/// - Requires an integer-returning `main`.
pub mod analyzer;
/// The evaluator module executes checked programs.
///
/// The evaluator walks the AST directly. Method bodies run in child scopes of
/// their defining scope, `RETURN` unwinds to the call boundary, and `OR`/`AND`
/// short-circuit.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements.
/// - Invokes host functions and program methods.
/// - Reports runtime faults such as division by zero or mismatched operands.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens for identifiers,
/// numbers, characters, strings and operators, each with its raw text and
/// character offset. This is the first stage of interpretation.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive descent parser with one function per grammar rule and one per
/// operator precedence tier.
pub mod parser;
/// Built-in bindings and the default global scope.
pub mod prelude;
/// Scopes, variables and function bindings.
///
/// Shared by the analyzer and the evaluator: both build chains of scopes and
/// resolve names by walking outwards.
pub mod scope;
/// The static type lattice.
pub mod types;
/// The value module defines the runtime values of the language.
pub mod value;
