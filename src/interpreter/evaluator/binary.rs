use std::{cmp::Ordering, rc::Rc};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::{BinaryOperator, Expression},
    error::RuntimeFault,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, expect_boolean},
        scope::Scope,
        value::Value,
    },
    util::num::{div_decimal, div_integer},
};

impl Interpreter {
    /// Evaluates a binary operation.
    ///
    /// `OR` and `AND` evaluate their right operand only when the left one does
    /// not decide the result. Every other operator evaluates both operands,
    /// left first.
    pub(in crate::interpreter::evaluator) fn evaluate_binary(&self,
                                                             operator: BinaryOperator,
                                                             left: &Expression,
                                                             right: &Expression,
                                                             scope: &Rc<Scope>)
                                                             -> EvalResult<Value> {
        match operator {
            BinaryOperator::Or => {
                if expect_boolean(&self.evaluate(left, scope)?)? {
                    return Ok(Value::Boolean(true));
                }
                Ok(Value::Boolean(expect_boolean(&self.evaluate(right, scope)?)?))
            },
            BinaryOperator::And => {
                if !expect_boolean(&self.evaluate(left, scope)?)? {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(expect_boolean(&self.evaluate(right, scope)?)?))
            },
            _ => {
                let left = self.evaluate(left, scope)?;
                let right = self.evaluate(right, scope)?;
                apply(operator, &left, &right)
            },
        }
    }
}

/// Applies a strict binary operator to two values.
///
/// # Errors
/// - [`RuntimeFault::OperandMismatch`] if the operand kinds do not fit the
///   operator.
/// - [`RuntimeFault::DivisionByZero`] for a zero divisor.
///
/// # Example
/// ```
/// use lectern::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply, value::Value},
/// };
///
/// let sum = apply(BinaryOperator::Add, &Value::from("n = "), &Value::from(3)).unwrap();
/// assert_eq!(sum, Value::from("n = 3"));
///
/// assert!(apply(BinaryOperator::Less, &Value::from(1), &Value::from('a')).is_err());
/// assert_eq!(apply(BinaryOperator::Equal, &Value::from(1), &Value::from('a')).unwrap(),
///            Value::Boolean(false));
/// ```
pub fn apply(operator: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let mismatch = || RuntimeFault::OperandMismatch { operator: operator.symbol(),
                                                      left:     left.kind_name(),
                                                      right:    right.kind_name(), };

    match operator {
        BinaryOperator::Equal => Ok(Value::Boolean(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(left != right)),
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual => {
            let ordering = compare(left, right).ok_or_else(mismatch)?;
            Ok(Value::Boolean(match operator {
                BinaryOperator::Less => ordering.is_lt(),
                BinaryOperator::Greater => ordering.is_gt(),
                BinaryOperator::LessEqual => ordering.is_le(),
                _ => ordering.is_ge(),
            }))
        },
        BinaryOperator::Add
            if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) =>
        {
            Ok(Value::from(format!("{left}{right}")))
        },
        BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div => {
            match (left, right) {
                (Value::Integer(a), Value::Integer(b)) => integer_arithmetic(operator, a, b),
                (Value::Decimal(a), Value::Decimal(b)) => decimal_arithmetic(operator, a, b),
                _ => Err(mismatch()),
            }
        },
        BinaryOperator::Or | BinaryOperator::And => {
            let (a, b) = (expect_boolean(left)?, expect_boolean(right)?);
            Ok(Value::Boolean(if operator == BinaryOperator::Or { a || b } else { a && b }))
        },
    }
}

/// Orders two values of the same comparable kind.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn integer_arithmetic(operator: BinaryOperator, a: &BigInt, b: &BigInt) -> EvalResult<Value> {
    Ok(Value::Integer(match operator {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        _ => div_integer(a, b).ok_or(RuntimeFault::DivisionByZero)?,
    }))
}

fn decimal_arithmetic(operator: BinaryOperator,
                      a: &BigDecimal,
                      b: &BigDecimal)
                      -> EvalResult<Value> {
    Ok(Value::Decimal(match operator {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        _ => div_decimal(a, b).ok_or(RuntimeFault::DivisionByZero)?,
    }))
}
