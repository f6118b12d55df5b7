use std::rc::Rc;

use crate::{
    ast::{ExprKind, Expression, Statement},
    error::RuntimeFault,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter, expect_boolean},
        scope::Scope,
        types::Type,
        value::Value,
    },
};

impl Interpreter {
    /// Executes statements in order until one returns.
    ///
    /// # Returns
    /// [`Flow::Return`] as soon as a statement returns, [`Flow::Next`] if the
    /// block runs to its end.
    pub fn execute_block(&self, body: &[Statement], scope: &Rc<Scope>) -> EvalResult<Flow> {
        for statement in body {
            if let Flow::Return(value) = self.execute_statement(statement, scope)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    /// Executes a single statement in `scope`.
    ///
    /// Bodies of `IF`, `WHILE` and `FOR` run in child scopes that are dropped
    /// when the body finishes, so their declarations never leak outwards.
    ///
    /// # Errors
    /// Returns any [`RuntimeFault`] raised while executing the statement.
    pub fn execute_statement(&self, statement: &Statement, scope: &Rc<Scope>) -> EvalResult<Flow> {
        match statement {
            Statement::Expression(expression) => {
                self.evaluate(expression, scope)?;
                Ok(Flow::Next)
            },
            Statement::Declaration(declaration) => {
                let value = match &declaration.initializer {
                    Some(initializer) => self.evaluate(initializer, scope)?,
                    None => Value::Nil,
                };
                scope.define_variable(&declaration.name, Type::Any, false, value);
                Ok(Flow::Next)
            },
            Statement::Assignment { receiver, value } => {
                self.execute_assignment(receiver, value, scope)?;
                Ok(Flow::Next)
            },
            Statement::If { condition,
                            then_body,
                            else_body, } => {
                let branch = if expect_boolean(&self.evaluate(condition, scope)?)? {
                    then_body
                } else {
                    else_body
                };
                self.execute_block(branch, &scope.child())
            },
            Statement::For { init,
                             condition,
                             increment,
                             body, } => self.execute_for(init.as_deref(), condition, increment.as_deref(), body, scope),
            Statement::While { condition, body } => {
                while expect_boolean(&self.evaluate(condition, scope)?)? {
                    if let Flow::Return(value) = self.execute_block(body, &scope.child())? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Next)
            },
            Statement::Return { value } => Ok(Flow::Return(self.evaluate(value, scope)?)),
        }
    }

    fn execute_assignment(&self,
                          receiver: &Expression,
                          value: &Expression,
                          scope: &Rc<Scope>)
                          -> EvalResult<()> {
        let ExprKind::Access { receiver: owner, name, .. } = &receiver.kind else {
            return Err(RuntimeFault::InvalidAssignmentTarget);
        };
        let owner = self.resolve_owner(owner.as_deref(), scope)?.0;
        let variable = owner.lookup_variable(name)?;
        let value = self.evaluate(value, scope)?;
        variable.assign(value)
    }

    /// Runs a `FOR` loop.
    ///
    /// The loop owns one scope: the init binds the loop variable there once,
    /// the condition and the increment see it, and each iteration's body runs
    /// in a fresh child of it.
    fn execute_for(&self,
                   init: Option<&Statement>,
                   condition: &Expression,
                   increment: Option<&Statement>,
                   body: &[Statement],
                   scope: &Rc<Scope>)
                   -> EvalResult<Flow> {
        let scope = scope.child();
        tracing::trace!("entering for loop");

        if let Some(init) = init {
            let Statement::Assignment { receiver, value } = init else {
                return Err(RuntimeFault::InvalidAssignmentTarget);
            };
            let ExprKind::Access { receiver: None, name, .. } = &receiver.kind else {
                return Err(RuntimeFault::InvalidAssignmentTarget);
            };
            let value = self.evaluate(value, &scope)?;
            scope.define_variable(name, Type::Any, false, value);
        }

        while expect_boolean(&self.evaluate(condition, &scope)?)? {
            if let Flow::Return(value) = self.execute_block(body, &scope.child())? {
                return Ok(Flow::Return(value));
            }
            if let Some(increment) = increment {
                self.execute_statement(increment, &scope)?;
            }
        }
        Ok(Flow::Next)
    }
}
