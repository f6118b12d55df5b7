use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use crate::{
    error::RuntimeFault,
    interpreter::{
        evaluator::core::EvalResult,
        scope::{Function, Scope},
        types::Type,
        value::Value,
    },
};

/// Shared sink for program output.
pub type Output = Rc<RefCell<dyn Write>>;

/// Creates a global scope whose `print` writes to standard output.
#[must_use]
pub fn global_scope() -> Rc<Scope> {
    global_scope_with_output(Rc::new(RefCell::new(io::stdout())))
}

/// Creates a global scope with the built-in functions.
///
/// - `print(Any): Nil` writes the textual form of its argument and a newline
///   to `output`.
/// - `log(Any): Any` emits its argument as an `info` event on the
///   `lectern::log` target and returns it unchanged.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use lectern::interpreter::{
///     evaluator::core::Interpreter, prelude::global_scope_with_output, value::Value,
/// };
///
/// let buffer = Rc::new(RefCell::new(Vec::<u8>::new()));
/// let scope = global_scope_with_output(buffer.clone());
///
/// let print = scope.lookup_function("print", 1).unwrap();
/// let result = Interpreter::new(&scope).invoke(&print, vec![Value::from("hi")]).unwrap();
///
/// assert_eq!(result, Value::Nil);
/// assert_eq!(buffer.borrow().as_slice(), b"hi\n");
/// ```
#[must_use]
pub fn global_scope_with_output(output: Output) -> Rc<Scope> {
    let scope = Scope::root();

    let body = move |args: &[Value]| print(args, &output);
    scope.define_function(Function::native("print", vec![Type::Any], Type::Nil, body));
    scope.define_function(Function::native("log", vec![Type::Any], Type::Any, log));

    scope
}

/// Writes a value followed by a newline.
fn print(args: &[Value], output: &Output) -> EvalResult<Value> {
    let [value] = args else {
        return Err(arity_fault("print", args));
    };
    writeln!(output.borrow_mut(), "{value}")?;
    Ok(Value::Nil)
}

/// Logs a value and returns it unchanged.
fn log(args: &[Value]) -> EvalResult<Value> {
    let [value] = args else {
        return Err(arity_fault("log", args));
    };
    tracing::info!(target: "lectern::log", %value);
    Ok(value.clone())
}

fn arity_fault(name: &str, args: &[Value]) -> RuntimeFault {
    RuntimeFault::ArgumentCount { name:     name.to_string(),
                                  expected: 1,
                                  found:    args.len(), }
}
