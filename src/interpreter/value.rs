use std::{fmt, rc::Rc};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::interpreter::{scope::Function, types::Type};

/// Represents a runtime value in the interpreter.
///
/// Values are immutable: arithmetic always produces a new value, and strings
/// and function references are shared rather than copied.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value, also the result of methods that do not return.
    Nil,
    /// `true` or `false`.
    Boolean(bool),
    /// An arbitrary precision integer.
    Integer(BigInt),
    /// An arbitrary precision decimal that keeps its scale.
    Decimal(BigDecimal),
    /// A single character.
    Character(char),
    /// An immutable string.
    String(Rc<str>),
    /// A reference to a function binding together with its closure.
    Function(Rc<Function>),
}

impl Value {
    /// Returns the name of the value's runtime kind, used in fault messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Boolean(_) => "Boolean",
            Self::Integer(_) => "Integer",
            Self::Decimal(_) => "Decimal",
            Self::Character(_) => "Character",
            Self::String(_) => "String",
            Self::Function(_) => "Function",
        }
    }

    /// Returns the static type describing the value's runtime kind.
    ///
    /// Function references have no dedicated static type and report `Any`.
    #[must_use]
    pub const fn type_of(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Boolean(_) => Type::Boolean,
            Self::Integer(_) => Type::Integer,
            Self::Decimal(_) => Type::Decimal,
            Self::Character(_) => Type::Character,
            Self::String(_) => Type::String,
            Self::Function(_) => Type::Any,
        }
    }
}

impl PartialEq for Value {
    /// Value equality. Values of different kinds are never equal; decimals
    /// compare numerically, so `1.0` equals `1.00`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Character(a), Self::Character(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(d) => f.write_str(&d.to_plain_string()),
            Self::Character(c) => write!(f, "{c}"),
            Self::String(s) => f.write_str(s),
            Self::Function(function) => {
                write!(f, "<function {}/{}>", function.name(), function.arity())
            },
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v.into())
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Self::Integer(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Character(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}
