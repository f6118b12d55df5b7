use std::rc::Rc;

use crate::{
    ast::Expression,
    error::RuntimeFault,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        scope::{Callable, Function, Scope},
        types::Type,
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a call, `name(args)` or `receiver.name(args)`.
    ///
    /// The receiver is evaluated first, then the arguments from left to right.
    /// A receiver call resolves the overload in the member table of the
    /// receiver's kind, one arity higher, and passes the receiver as the first
    /// argument.
    pub(in crate::interpreter::evaluator) fn evaluate_call(&self,
                                                           receiver: Option<&Expression>,
                                                           name: &str,
                                                           arguments: &[Expression],
                                                           scope: &Rc<Scope>)
                                                           -> EvalResult<Value> {
        let (owner, receiver) = self.resolve_owner(receiver, scope)?;

        let mut values = Vec::with_capacity(arguments.len() + 1);
        values.extend(receiver);
        for argument in arguments {
            values.push(self.evaluate(argument, scope)?);
        }

        let function = owner.lookup_function(name, values.len())?;
        self.invoke(&function, values)
    }

    /// Returns the scope a name is resolved in, along with the receiver's
    /// value when there is one.
    pub(in crate::interpreter::evaluator) fn resolve_owner(
        &self,
        receiver: Option<&Expression>,
        scope: &Rc<Scope>)
        -> EvalResult<(Rc<Scope>, Option<Value>)> {
        let Some(receiver) = receiver else {
            return Ok((Rc::clone(scope), None));
        };
        let value = self.evaluate(receiver, scope)?;
        let members = scope.lookup_members(value.type_of())?;
        Ok((members, Some(value)))
    }

    /// Invokes a function binding with already evaluated arguments.
    ///
    /// Program methods run in a fresh child of their defining scope with the
    /// parameters bound positionally. A `RETURN` anywhere in the body ends the
    /// call; falling off the end yields `Nil`.
    ///
    /// # Errors
    /// - [`RuntimeFault::ArgumentCount`] if the number of arguments differs
    ///   from the arity.
    /// - [`RuntimeFault::ScopeExpired`] if the defining scope is gone.
    /// - [`RuntimeFault::NotInvocable`] for analyzer-only signatures.
    /// - Any fault raised by the body.
    pub fn invoke(&self, function: &Function, arguments: Vec<Value>) -> EvalResult<Value> {
        if arguments.len() != function.arity() {
            return Err(RuntimeFault::ArgumentCount { name:     function.name().to_string(),
                                                     expected: function.arity(),
                                                     found:    arguments.len(), });
        }
        tracing::trace!(function = function.name(), arity = function.arity(), "invoking");

        match function.callable() {
            Callable::Native(body) => body(&arguments),
            Callable::Method { method, closure } => {
                let closure =
                    closure.upgrade()
                           .ok_or_else(|| RuntimeFault::ScopeExpired { name: method.name.clone() })?;
                let scope = closure.child();
                for (name, value) in method.parameters.iter().zip(arguments) {
                    scope.define_variable(name, Type::Any, false, value);
                }

                match self.execute_block(&method.body, &scope)? {
                    Flow::Return(value) => Ok(value),
                    Flow::Next => Ok(Value::Nil),
                }
            },
            Callable::Signature => {
                Err(RuntimeFault::NotInvocable { name: function.name().to_string() })
            },
        }
    }
}
