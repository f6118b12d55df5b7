use std::rc::Rc;

use crate::{
    ast::{Declaration, ExprKind, Expression, Statement},
    error::TypeError,
    interpreter::{
        analyzer::core::{Analyzer, MethodFrame, TypeResult},
        scope::Scope,
        types::{Type, require_assignable},
        value::Value,
    },
};

impl Analyzer {
    /// Checks the statements of a block in order, all in `scope`.
    pub(in crate::interpreter::analyzer) fn visit_block(&self,
                                                        body: &[Statement],
                                                        scope: &Rc<Scope>,
                                                        frame: &MethodFrame<'_>)
                                                        -> TypeResult<()> {
        body.iter()
            .try_for_each(|statement| self.visit_statement(statement, scope, frame))
    }

    fn visit_statement(&self,
                       statement: &Statement,
                       scope: &Rc<Scope>,
                       frame: &MethodFrame<'_>)
                       -> TypeResult<()> {
        match statement {
            Statement::Expression(expression) => self.visit_expression(expression, scope).map(drop),
            Statement::Declaration(declaration) => self.visit_declaration(declaration, scope),
            Statement::Assignment { receiver, value } => self.visit_assignment(receiver, value, scope),
            Statement::If { condition,
                            then_body,
                            else_body, } => {
                self.visit_condition(condition, scope)?;
                if then_body.is_empty() {
                    return Err(TypeError::EmptyThenBranch { offset: condition.offset });
                }
                self.visit_block(then_body, &scope.child(), frame)?;
                self.visit_block(else_body, &scope.child(), frame)
            },
            Statement::For { init,
                             condition,
                             increment,
                             body, } => {
                let scope = scope.child();
                if let Some(init) = init {
                    self.visit_loop_init(init, &scope)?;
                }
                self.visit_condition(condition, &scope)?;
                if let Some(increment) = increment {
                    self.visit_statement(increment, &scope, frame)?;
                }
                self.visit_block(body, &scope.child(), frame)
            },
            Statement::While { condition, body } => {
                self.visit_condition(condition, scope)?;
                self.visit_block(body, &scope.child(), frame)
            },
            Statement::Return { value } => {
                let found = self.visit_expression(value, scope)?;
                let expected =
                    frame.return_type
                         .ok_or_else(|| TypeError::MissingReturnType { method: frame.name.to_string(),
                                                                       offset: value.offset, })?;
                require_assignable(expected, found, value.offset)
            },
        }
    }

    fn visit_declaration(&self, declaration: &Declaration, scope: &Rc<Scope>) -> TypeResult<()> {
        let ty = self.declared_type(&declaration.name,
                                    declaration.type_name.as_deref(),
                                    declaration.initializer.as_ref(),
                                    declaration.offset,
                                    scope)?;
        let variable = scope.define_variable(&declaration.name, ty, false, Value::Nil);
        declaration.variable.resolve(variable);
        Ok(())
    }

    fn visit_assignment(&self,
                        receiver: &Expression,
                        value: &Expression,
                        scope: &Rc<Scope>)
                        -> TypeResult<()> {
        let ExprKind::Access { name, variable, .. } = &receiver.kind else {
            return Err(TypeError::InvalidAssignmentTarget { offset: receiver.offset });
        };

        let target = self.visit_expression(receiver, scope)?;
        let found = self.visit_expression(value, scope)?;
        if target != found {
            return Err(TypeError::AssignmentMismatch { target,
                                                       value: found,
                                                       offset: value.offset });
        }

        if variable.get().is_some_and(|variable| variable.is_constant()) {
            return Err(TypeError::ConstantAssignment { name:   name.clone(),
                                                       offset: receiver.offset, });
        }
        Ok(())
    }

    /// Binds the loop variable of a `FOR`, typed by its initial value.
    fn visit_loop_init(&self, init: &Statement, scope: &Rc<Scope>) -> TypeResult<()> {
        let Statement::Assignment { receiver, value } = init else {
            return Err(TypeError::InvalidAssignmentTarget { offset: 0 });
        };
        let ExprKind::Access { receiver: None,
                               name,
                               variable, } = &receiver.kind
        else {
            return Err(TypeError::InvalidAssignmentTarget { offset: receiver.offset });
        };

        let ty = self.visit_expression(value, scope)?;
        variable.resolve(scope.define_variable(name, ty, false, Value::Nil));
        receiver.ty.resolve(ty);
        Ok(())
    }

    fn visit_condition(&self, condition: &Expression, scope: &Rc<Scope>) -> TypeResult<()> {
        let found = self.visit_expression(condition, scope)?;
        require_assignable(Type::Boolean, found, condition.offset)
    }
}
