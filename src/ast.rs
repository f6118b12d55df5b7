use std::{cell::OnceCell, fmt, rc::Rc};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::interpreter::{
    scope::{Function, Variable},
    types::Type,
};

/// A decoration slot filled in after the tree has been built.
///
/// The analyzer stores resolved types and bindings here. A slot is written at
/// most once; later writes are ignored so that a tree checked twice keeps the
/// bindings of its first check. Slots never take part in structural equality,
/// which keeps freshly parsed and already checked trees comparable.
pub struct Slot<T>(OnceCell<T>);

impl<T> Slot<T> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self(OnceCell::new())
    }

    /// Returns the stored decoration, if the slot was filled.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.0.get()
    }

    /// Fills the slot unless it already holds a value, and returns the value
    /// that ends up stored.
    pub fn resolve(&self, value: T) -> &T {
        self.0.get_or_init(|| value)
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(value) => write!(f, "Slot({value:?})"),
            None => f.write_str("Slot(<unresolved>)"),
        }
    }
}

/// The root of a program: global fields followed by methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Global fields in declaration order.
    pub fields:  Vec<Field>,
    /// Methods in declaration order.
    ///
    /// Methods are reference counted because the evaluator keeps them alive
    /// inside the function bindings it installs.
    pub methods: Vec<Rc<Method>>,
}

/// A global field, `LET CONST? name: Type (= value)?;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Name of the field.
    pub name:        String,
    /// Declared type name.
    pub type_name:   Option<String>,
    /// Whether the field was declared with `CONST`.
    pub constant:    bool,
    /// Initial value.
    pub initializer: Option<Expression>,
    /// Character offset of the field name.
    pub offset:      usize,
    /// Binding resolved by the analyzer.
    pub variable:    Slot<Rc<Variable>>,
}

/// A method definition, `DEF name(p: Type, ...): Type DO ... END`.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// Name of the method.
    pub name:            String,
    /// Parameter names in order.
    pub parameters:      Vec<String>,
    /// Parameter type names, one per parameter.
    pub parameter_types: Vec<String>,
    /// Declared return type name.
    pub return_type:     Option<String>,
    /// Statements of the body.
    pub body:            Vec<Statement>,
    /// Character offset of the method name.
    pub offset:          usize,
    /// Binding resolved by the analyzer.
    pub function:        Slot<Rc<Function>>,
}

/// A local declaration, `LET name (: Type)? (= value)?;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Name of the declared variable.
    pub name:        String,
    /// Declared type name.
    pub type_name:   Option<String>,
    /// Initial value.
    pub initializer: Option<Expression>,
    /// Character offset of the variable name.
    pub offset:      usize,
    /// Binding resolved by the analyzer.
    pub variable:    Slot<Rc<Variable>>,
}

/// A statement inside a method body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its side effects, `f(x);`.
    Expression(Expression),
    /// A local variable declaration.
    Declaration(Declaration),
    /// An assignment, `receiver = value;`.
    Assignment {
        /// The assigned place. Must be an access expression.
        receiver: Expression,
        /// The new value.
        value:    Expression,
    },
    /// `IF condition DO ... ELSE ... END`.
    If {
        /// The condition, which must be a boolean.
        condition: Expression,
        /// Statements executed when the condition holds.
        then_body: Vec<Self>,
        /// Statements executed otherwise. Empty when there is no `ELSE`.
        else_body: Vec<Self>,
    },
    /// `FOR (init; condition; increment) ... END`.
    ///
    /// `init` and `increment` are always assignments to a bare name. The init
    /// binds the loop variable in the loop's own scope; the increment assigns
    /// to it after every iteration.
    For {
        /// Binds the loop variable once before the first iteration.
        init:      Option<Box<Self>>,
        /// Evaluated before every iteration.
        condition: Expression,
        /// Runs after every iteration.
        increment: Option<Box<Self>>,
        /// The loop body.
        body:      Vec<Self>,
    },
    /// `WHILE condition DO ... END`.
    While {
        /// Evaluated before every iteration.
        condition: Expression,
        /// The loop body.
        body:      Vec<Self>,
    },
    /// `RETURN value;`.
    Return {
        /// The returned value.
        value: Expression,
    },
}

/// A literal value as written in source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `NIL`.
    Nil,
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// An integer literal, kept at full precision until the analyzer checks
    /// its range.
    Integer(BigInt),
    /// A decimal literal.
    Decimal(BigDecimal),
    /// A character literal with escapes decoded.
    Character(char),
    /// A string literal with escapes decoded.
    String(String),
}

/// Binary operators, from loosest to tightest binding tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `OR`
    Or,
    /// `AND`
    And,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOperator {
    /// Returns the operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Returns `true` for `OR` and `AND`.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::Or | Self::And)
    }

    /// Returns `true` for the six comparison operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An expression node.
///
/// Besides its [`ExprKind`] every node records where it starts in the source
/// and carries a slot for the static type the analyzer resolves for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    /// What kind of expression this is.
    pub kind:   ExprKind,
    /// Character offset of the first token of the expression.
    pub offset: usize,
    /// Static type resolved by the analyzer.
    pub ty:     Slot<Type>,
}

/// The variants of [`Expression`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A literal value.
    Literal(Literal),
    /// A parenthesized binary expression.
    Group(Box<Expression>),
    /// A binary operation.
    Binary {
        /// The operator.
        operator: BinaryOperator,
        /// Left operand.
        left:     Box<Expression>,
        /// Right operand.
        right:    Box<Expression>,
    },
    /// A variable read, `name`, or a field read, `receiver.name`.
    Access {
        /// The value whose field is read.
        receiver: Option<Box<Expression>>,
        /// Name of the variable or field.
        name:     String,
        /// Binding resolved by the analyzer.
        variable: Slot<Rc<Variable>>,
    },
    /// A call, `name(args)`, or a method call, `receiver.name(args)`.
    Function {
        /// The value the method is called on.
        receiver:  Option<Box<Expression>>,
        /// Name of the function.
        name:      String,
        /// Arguments in order.
        arguments: Vec<Expression>,
        /// Binding resolved by the analyzer.
        function:  Slot<Rc<Function>>,
    },
}

impl Expression {
    /// Creates an undecorated expression node.
    #[must_use]
    pub const fn new(kind: ExprKind, offset: usize) -> Self {
        Self { kind,
               offset,
               ty: Slot::new() }
    }

    /// Creates a literal node.
    #[must_use]
    pub const fn literal(value: Literal, offset: usize) -> Self {
        Self::new(ExprKind::Literal(value), offset)
    }

    /// Creates a binary node starting at the left operand.
    #[must_use]
    pub fn binary(operator: BinaryOperator, left: Self, right: Self) -> Self {
        let offset = left.offset;
        Self::new(ExprKind::Binary { operator,
                                     left: Box::new(left),
                                     right: Box::new(right) },
                  offset)
    }

    /// Creates an access node.
    #[must_use]
    pub fn access(receiver: Option<Self>, name: impl Into<String>, offset: usize) -> Self {
        Self::new(ExprKind::Access { receiver: receiver.map(Box::new),
                                     name:     name.into(),
                                     variable: Slot::new(), },
                  offset)
    }

    /// Creates a call node.
    #[must_use]
    pub fn function(receiver: Option<Self>,
                    name: impl Into<String>,
                    arguments: Vec<Self>,
                    offset: usize)
                    -> Self {
        Self::new(ExprKind::Function { receiver: receiver.map(Box::new),
                                       name: name.into(),
                                       arguments,
                                       function: Slot::new() },
                  offset)
    }

    /// Returns the static type resolved by the analyzer, if it ran.
    #[must_use]
    pub fn resolved_type(&self) -> Option<Type> {
        self.ty.get().copied()
    }
}
