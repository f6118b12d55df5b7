/// Entry points of the parser: sources, fields, methods and expressions.
///
/// Holds the `ParseResult` alias and the top-level `source` rule.
pub mod core;

/// Statement parsing.
///
/// Declarations, assignments, `IF`, `FOR`, `WHILE` and `RETURN`, plus the
/// statement blocks they contain.
pub mod statement;

/// Binary operator parsing.
///
/// One function per precedence tier, from logical operators down to
/// multiplication. Every tier is left-associative.
pub mod binary;

/// Primary and secondary expressions.
///
/// Literals, groupings, names, calls and `.` member access chains, including
/// decoding of escapes in character and string literals.
pub mod primary;

/// Token stream and shared helpers.
pub mod utils;
