use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, ExprKind, Expression, Literal},
    error::TypeError,
    interpreter::{
        analyzer::core::{Analyzer, TypeResult},
        scope::{Function, Scope},
        types::{Type, require_assignable},
    },
    util::num::{fits_f64, fits_i32},
};

impl Analyzer {
    /// Resolves the static type of an expression and records it in the node.
    ///
    /// Names and calls additionally record the binding they resolve to.
    ///
    /// # Errors
    /// Returns the first [`TypeError`] found in the expression or its
    /// operands.
    pub fn visit_expression(&self, expression: &Expression, scope: &Rc<Scope>) -> TypeResult<Type> {
        let ty = match &expression.kind {
            ExprKind::Literal(literal) => Self::visit_literal(literal, expression.offset)?,
            ExprKind::Group(inner) => {
                if !matches!(inner.kind, ExprKind::Binary { .. }) {
                    return Err(TypeError::InvalidGroup { offset: inner.offset });
                }
                self.visit_expression(inner, scope)?
            },
            ExprKind::Binary { operator, left, right } => {
                let left_ty = self.visit_expression(left, scope)?;
                let right_ty = self.visit_expression(right, scope)?;
                Self::visit_binary(*operator, (left_ty, left.offset), (right_ty, right.offset), expression.offset)?
            },
            ExprKind::Access { receiver,
                               name,
                               variable, } => {
                let owner = self.resolve_owner(receiver.as_deref(), scope)?;
                let binding = owner.lookup_variable(name)
                                   .map_err(|source| TypeError::unresolved(source, expression.offset))?;
                let ty = binding.ty();
                variable.resolve(binding);
                ty
            },
            ExprKind::Function { receiver,
                                 name,
                                 arguments,
                                 function, } => {
                let owner = self.resolve_owner(receiver.as_deref(), scope)?;
                let argument_types = arguments.iter()
                                              .map(|argument| self.visit_expression(argument, scope))
                                              .collect::<TypeResult<Vec<_>>>()?;

                // Member functions take their receiver as the first parameter.
                let implicit = usize::from(receiver.is_some());
                let binding = owner.lookup_function(name, arguments.len() + implicit)
                                   .map_err(|source| TypeError::unresolved(source, expression.offset))?;
                check_arguments(&binding, implicit, &argument_types, arguments)?;
                let ty = binding.return_type();
                function.resolve(binding);
                ty
            },
        };

        expression.ty.resolve(ty);
        Ok(ty)
    }

    /// Returns the scope a name is resolved in: the member table of the
    /// receiver's type, or `scope` itself when there is no receiver.
    fn resolve_owner(&self, receiver: Option<&Expression>, scope: &Rc<Scope>) -> TypeResult<Rc<Scope>> {
        let Some(receiver) = receiver else {
            return Ok(Rc::clone(scope));
        };
        let ty = self.visit_expression(receiver, scope)?;
        scope.lookup_members(ty)
             .map_err(|source| TypeError::unresolved(source, receiver.offset))
    }

    fn visit_literal(literal: &Literal, offset: usize) -> TypeResult<Type> {
        Ok(match literal {
            Literal::Nil => Type::Any,
            Literal::Boolean(_) => Type::Boolean,
            Literal::Integer(value) => {
                if !fits_i32(value) {
                    return Err(TypeError::IntegerOutOfRange { literal: value.to_string(),
                                                              offset });
                }
                Type::Integer
            },
            Literal::Decimal(value) => {
                if !fits_f64(value) {
                    return Err(TypeError::DecimalOutOfRange { literal: value.to_string(),
                                                              offset });
                }
                Type::Decimal
            },
            Literal::Character(_) => Type::Character,
            Literal::String(_) => Type::String,
        })
    }

    fn visit_binary(operator: BinaryOperator,
                    (left, left_offset): (Type, usize),
                    (right, right_offset): (Type, usize),
                    offset: usize)
                    -> TypeResult<Type> {
        if operator.is_logical() {
            require_assignable(Type::Boolean, left, left_offset)?;
            require_assignable(Type::Boolean, right, right_offset)?;
            return Ok(Type::Boolean);
        }
        if operator.is_comparison() {
            require_assignable(Type::Comparable, left, left_offset)?;
            require_assignable(Type::Comparable, right, right_offset)?;
            return Ok(Type::Boolean);
        }
        if operator == BinaryOperator::Add && (left == Type::String || right == Type::String) {
            return Ok(Type::String);
        }

        // The right operand decides between integer and decimal arithmetic.
        match right {
            Type::Integer | Type::Decimal if left == right => Ok(right),
            _ => Err(TypeError::ArithmeticMismatch { operator: operator.symbol(),
                                                     left,
                                                     right,
                                                     offset }),
        }
    }
}

/// Checks every explicit argument against its parameter type, skipping the
/// implicit receiver parameter of member functions.
fn check_arguments(function: &Function,
                   implicit: usize,
                   argument_types: &[Type],
                   arguments: &[Expression])
                   -> TypeResult<()> {
    function.parameter_types()[implicit..].iter()
                                          .zip(argument_types.iter().zip(arguments))
                                          .try_for_each(|(&parameter, (&found, argument))| {
                                              require_assignable(parameter, found, argument.offset)
                                          })
}
