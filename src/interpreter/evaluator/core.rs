use std::rc::Rc;

use num_traits::ToPrimitive;

use crate::{
    ast::{ExprKind, Expression, Field, Literal, Method, Source},
    error::RuntimeFault,
    interpreter::{
        scope::{Callable, Function, Scope},
        types::Type,
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeFault` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeFault>;

/// How control leaves a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Next,
    /// Unwind to the enclosing call with the returned value.
    Return(Value),
}

/// Executes checked programs.
///
/// The interpreter owns the program's global scope, a child of the scope the
/// host supplies. Fields and method bindings are installed there; every other
/// scope is created for the duration of one block and passed explicitly from
/// statement to statement.
///
/// ## Usage
///
/// An `Interpreter` runs one program. Values that refer to its methods stay
/// callable only while the interpreter, and with it the global scope, is
/// alive.
pub struct Interpreter {
    scope: Rc<Scope>,
}

impl Interpreter {
    /// Creates an interpreter whose global scope is a child of `parent`.
    #[must_use]
    pub fn new(parent: &Rc<Scope>) -> Self {
        Self { scope: parent.child() }
    }

    /// Returns the program's global scope.
    #[must_use]
    pub const fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    /// Evaluates the fields, installs the methods and invokes `main`.
    ///
    /// # Parameters
    /// - `source`: The program, normally already checked by the analyzer.
    ///
    /// # Returns
    /// The value returned by `main`, or `Nil` if it falls off its end.
    ///
    /// # Errors
    /// Returns the first [`RuntimeFault`] raised, including an unresolved
    /// `main`.
    pub fn execute(&self, source: &Source) -> EvalResult<Value> {
        for field in &source.fields {
            self.define_field(field)?;
        }
        for method in &source.methods {
            self.define_method(method);
        }

        let main = self.scope.lookup_function("main", 0)?;
        let result = self.invoke(&main, Vec::new())?;
        tracing::debug!(%result, "main returned");
        Ok(result)
    }

    /// Runs a program and returns its exit code.
    ///
    /// # Errors
    /// Returns any fault raised by the program, or
    /// [`RuntimeFault::InvalidExitCode`] if `main` does not return an integer
    /// that fits into 32 bits.
    ///
    /// # Example
    /// ```
    /// use lectern::interpreter::{
    ///     evaluator::core::Interpreter, lexer::tokenize, parser::core::parse, prelude,
    /// };
    ///
    /// let tokens = tokenize("DEF main(): Integer DO RETURN 6 * 7; END").unwrap();
    /// let source = parse(&tokens).unwrap();
    ///
    /// let interpreter = Interpreter::new(&prelude::global_scope());
    /// assert_eq!(interpreter.run(&source).unwrap(), 42);
    /// ```
    pub fn run(&self, source: &Source) -> EvalResult<i32> {
        match self.execute(source)? {
            Value::Integer(code) => {
                code.to_i32()
                    .ok_or_else(|| RuntimeFault::InvalidExitCode { found: code.to_string() })
            },
            other => Err(RuntimeFault::InvalidExitCode { found: other.to_string() }),
        }
    }

    fn define_field(&self, field: &Field) -> EvalResult<()> {
        let value = match &field.initializer {
            Some(initializer) => self.evaluate(initializer, &self.scope)?,
            None => Value::Nil,
        };
        self.scope
            .define_variable(&field.name, Type::Any, field.constant, value);
        Ok(())
    }

    /// Installs a method in the global scope as a callable overload, and as a
    /// constant holding a reference to it unless a field or an earlier
    /// overload already owns the name.
    fn define_method(&self, method: &Rc<Method>) {
        let callable = Callable::Method { method:  Rc::clone(method),
                                          closure: Rc::downgrade(&self.scope), };
        let function = self.scope
                           .define_function(Function::new(&method.name,
                                                          vec![Type::Any; method.parameters.len()],
                                                          Type::Any,
                                                          callable));
        if !self.scope.defines_variable(&method.name) {
            self.scope
                .define_variable(&method.name, Type::Any, true, Value::Function(function));
        }
    }

    /// Evaluates an expression in `scope`.
    ///
    /// The evaluator dispatches on the expression kind: literals, groups,
    /// binary operations, variable and field reads, and calls.
    ///
    /// # Errors
    /// Returns a [`RuntimeFault`] if an operand has the wrong kind, a name
    /// cannot be resolved, or a called function faults.
    pub fn evaluate(&self, expression: &Expression, scope: &Rc<Scope>) -> EvalResult<Value> {
        match &expression.kind {
            ExprKind::Literal(literal) => Ok(Self::evaluate_literal(literal)),
            ExprKind::Group(inner) => self.evaluate(inner, scope),
            ExprKind::Binary { operator, left, right } => {
                self.evaluate_binary(*operator, left, right, scope)
            },
            ExprKind::Access { receiver, name, .. } => {
                let owner = self.resolve_owner(receiver.as_deref(), scope)?.0;
                Ok(owner.lookup_variable(name)?.value())
            },
            ExprKind::Function { receiver,
                                 name,
                                 arguments,
                                 .. } => self.evaluate_call(receiver.as_deref(), name, arguments, scope),
        }
    }

    fn evaluate_literal(literal: &Literal) -> Value {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Boolean(value) => Value::Boolean(*value),
            Literal::Integer(value) => Value::Integer(value.clone()),
            Literal::Decimal(value) => Value::Decimal(value.clone()),
            Literal::Character(value) => Value::Character(*value),
            Literal::String(value) => Value::from(value.as_str()),
        }
    }
}

/// Checks that a value is a boolean and returns it.
///
/// # Errors
/// Returns [`RuntimeFault::ExpectedBoolean`] for any other kind.
pub fn expect_boolean(value: &Value) -> EvalResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        other => Err(RuntimeFault::ExpectedBoolean { found: other.kind_name() }),
    }
}

/// Runs a program against the built-ins of `parent` and returns its exit
/// code.
///
/// # Errors
/// Returns the first [`RuntimeFault`] raised.
pub fn run(source: &Source, parent: &Rc<Scope>) -> EvalResult<i32> {
    Interpreter::new(parent).run(source)
}
