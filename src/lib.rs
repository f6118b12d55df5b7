//! # lectern
//!
//! lectern is a front end and tree-walking interpreter for a small imperative
//! teaching language written in Rust. Source text is turned into tokens, the
//! tokens into an abstract syntax tree, the tree is statically type checked
//! and finally executed.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! let source = r#"
//!     LET x: Integer = 5;
//!     DEF main(): Integer DO
//!         IF x > 3 DO
//!             print("big");
//!         ELSE
//!             print("small");
//!         END
//!         RETURN 0;
//!     END
//! "#;
//!
//! let output = Rc::new(RefCell::new(Vec::<u8>::new()));
//! let code = lectern::run_source(source, output.clone()).unwrap();
//!
//! assert_eq!(code, 0);
//! assert_eq!(output.borrow().as_slice(), b"big\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

pub use crate::{
    error::Error,
    interpreter::{
        analyzer::core::check, evaluator::core::run, lexer::tokenize, parser::core::parse,
    },
};
use crate::{ast::Source, interpreter::prelude};

/// Defines the structure of parsed code.
///
/// This module declares the nodes of the abstract syntax tree: the program
/// root, fields, methods, statements and expressions. Nodes carry source
/// offsets for error reporting and slots that the analyzer fills with resolved
/// types and bindings.
pub mod ast;
/// Provides unified error types for every phase.
///
/// This module defines the failures that can be raised while lexing, parsing,
/// checking or running a program, plus the name resolution failure shared by
/// the last two. Each phase has its own type; [`Error`] wraps all of them.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the lexer, parser, analyzer, evaluator, scopes,
/// types and runtime values.
pub mod interpreter;
/// General numeric helpers.
///
/// Range checks for literals and the division rules shared by the evaluator.
pub mod util;

/// Lexes, parses and checks a program against the default built-ins.
///
/// # Errors
/// Returns the first lexical, syntactic or type error.
///
/// # Examples
/// ```
/// use lectern::{Error, check_source};
///
/// assert!(check_source("DEF main(): Integer DO RETURN 0; END").is_ok());
///
/// // `main` must return an Integer.
/// let result = check_source("DEF main(): String DO RETURN \"0\"; END");
/// assert!(matches!(result, Err(Error::Type(_))));
/// ```
pub fn check_source(source: &str) -> Result<Source, Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    check(&program, &prelude::global_scope())?;
    Ok(program)
}

/// Runs the whole pipeline on a program and returns its exit code.
///
/// Output of `print` goes to `output`.
///
/// # Errors
/// Returns the first error of any phase. Nothing runs unless the program
/// passes the static checks.
pub fn run_source(source: &str, output: prelude::Output) -> Result<i32, Error> {
    let program = check_source(source)?;
    Ok(run(&program, &prelude::global_scope_with_output(output))?)
}
