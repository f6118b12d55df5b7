use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    ast::Method,
    error::{NameError, RuntimeFault},
    interpreter::{evaluator::core::EvalResult, types::Type, value::Value},
};

/// A named variable binding.
///
/// The analyzer fills in the static type and leaves the value at `Nil`; the
/// evaluator stores the current value and uses `Any` as the type. The constant
/// flag is fixed at definition and checked on every assignment.
#[derive(Debug)]
pub struct Variable {
    name:     String,
    ty:       Type,
    constant: bool,
    value:    RefCell<Value>,
}

impl Variable {
    /// Returns the name of the variable.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the static type of the variable.
    #[must_use]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Returns `true` if the variable may never be reassigned.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        self.constant
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Replaces the current value.
    ///
    /// # Errors
    /// Returns [`RuntimeFault::ConstantAssignment`] if the variable is a
    /// constant.
    pub fn assign(&self, value: Value) -> EvalResult<()> {
        if self.constant {
            return Err(RuntimeFault::ConstantAssignment { name: self.name.clone() });
        }
        *self.value.borrow_mut() = value;
        Ok(())
    }
}

/// Host implementation of a function.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> EvalResult<Value>>;

/// How a function binding is invoked.
#[derive(Clone)]
pub enum Callable {
    /// A function implemented by the host, such as `print`.
    Native(NativeFn),
    /// A method from the program, together with the scope it was defined in.
    ///
    /// The scope is held weakly: the binding lives inside that very scope.
    Method {
        /// The method definition.
        method:  Rc<Method>,
        /// The defining scope.
        closure: Weak<Scope>,
    },
    /// A signature known to the analyzer only.
    Signature,
}

/// A function binding, identified by its name and arity.
#[derive(Clone)]
pub struct Function {
    name:            String,
    parameter_types: Vec<Type>,
    return_type:     Type,
    callable:        Callable,
}

impl Function {
    /// Creates a function binding.
    #[must_use]
    pub fn new(name: impl Into<String>,
               parameter_types: Vec<Type>,
               return_type: Type,
               callable: Callable)
               -> Self {
        Self { name: name.into(),
               parameter_types,
               return_type,
               callable }
    }

    /// Creates a host function.
    ///
    /// # Example
    /// ```
    /// use lectern::interpreter::{scope::Function, types::Type, value::Value};
    ///
    /// let twice = Function::native("twice", vec![Type::String], Type::String, |args| {
    ///     Ok(Value::from(format!("{0}{0}", args[0])))
    /// });
    ///
    /// assert_eq!(twice.arity(), 1);
    /// assert_eq!(twice.return_type(), Type::String);
    /// ```
    #[must_use]
    pub fn native(name: impl Into<String>,
                  parameter_types: Vec<Type>,
                  return_type: Type,
                  body: impl Fn(&[Value]) -> EvalResult<Value> + 'static)
                  -> Self {
        Self::new(name, parameter_types, return_type, Callable::Native(Rc::new(body)))
    }

    /// Returns the name of the function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Returns the declared parameter types.
    #[must_use]
    pub fn parameter_types(&self) -> &[Type] {
        &self.parameter_types
    }

    /// Returns the declared return type.
    #[must_use]
    pub const fn return_type(&self) -> Type {
        self.return_type
    }

    /// Returns how the function is invoked.
    #[must_use]
    pub const fn callable(&self) -> &Callable {
        &self.callable
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name)
         .field("parameter_types", &self.parameter_types)
         .field("return_type", &self.return_type)
         .finish_non_exhaustive()
    }
}

/// One level of the symbol table.
///
/// Scopes form a singly linked chain towards the global scope. Definitions go
/// into the scope itself and replace earlier definitions of the same name;
/// lookups walk outwards. A scope never changes its parent's bindings, it can
/// only shadow them.
#[derive(Default)]
pub struct Scope {
    parent:    Option<Rc<Self>>,
    variables: RefCell<HashMap<String, Rc<Variable>>>,
    functions: RefCell<HashMap<(String, usize), Rc<Function>>>,
    members:   RefCell<HashMap<Type, Rc<Self>>>,
}

impl Scope {
    /// Creates a scope without a parent.
    #[must_use]
    pub fn root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Creates a new scope whose parent is `self`.
    #[must_use]
    pub fn child(self: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { parent: Some(Rc::clone(self)),
                       ..Self::default() })
    }

    /// Returns the enclosing scope.
    #[must_use]
    pub const fn parent(&self) -> Option<&Rc<Self>> {
        self.parent.as_ref()
    }

    /// Defines a variable in this scope, replacing any earlier definition of
    /// the same name here, and returns the new binding.
    pub fn define_variable(&self,
                           name: impl Into<String>,
                           ty: Type,
                           constant: bool,
                           value: Value)
                           -> Rc<Variable> {
        let name = name.into();
        let variable = Rc::new(Variable { name: name.clone(),
                                          ty,
                                          constant,
                                          value: RefCell::new(value) });
        self.variables
            .borrow_mut()
            .insert(name, Rc::clone(&variable));
        variable
    }

    /// Defines a function in this scope under its name and arity, replacing any
    /// earlier definition with the same key here, and returns the binding.
    pub fn define_function(&self, function: Function) -> Rc<Function> {
        let function = Rc::new(function);
        self.functions
            .borrow_mut()
            .insert((function.name.clone(), function.arity()), Rc::clone(&function));
        function
    }

    /// Attaches the member table of a type: its fields as variables and its
    /// methods as functions whose first parameter is the receiver.
    pub fn define_members(&self, ty: Type, members: Rc<Self>) {
        self.members.borrow_mut().insert(ty, members);
    }

    /// Returns `true` if this scope itself, ignoring its parents, defines a
    /// variable named `name`.
    #[must_use]
    pub fn defines_variable(&self, name: &str) -> bool {
        self.variables.borrow().contains_key(name)
    }

    /// Looks up a variable, walking outwards through the parent chain.
    ///
    /// # Errors
    /// Returns [`NameError::Variable`] if no scope on the chain defines it.
    ///
    /// # Example
    /// ```
    /// use lectern::interpreter::{scope::Scope, types::Type, value::Value};
    ///
    /// let global = Scope::root();
    /// global.define_variable("x", Type::Integer, false, Value::from(1));
    ///
    /// let inner = global.child();
    /// inner.define_variable("y", Type::Integer, false, Value::from(2));
    ///
    /// assert!(inner.lookup_variable("x").is_ok());
    /// assert!(global.lookup_variable("y").is_err());
    /// ```
    pub fn lookup_variable(&self, name: &str) -> Result<Rc<Variable>, NameError> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(variable) = current.variables.borrow().get(name) {
                return Ok(Rc::clone(variable));
            }
            scope = current.parent.as_deref();
        }
        Err(NameError::Variable { name: name.to_string() })
    }

    /// Looks up a function by name and arity, walking outwards through the
    /// parent chain.
    ///
    /// # Errors
    /// Returns [`NameError::Function`] if no scope on the chain defines it.
    pub fn lookup_function(&self, name: &str, arity: usize) -> Result<Rc<Function>, NameError> {
        let key = (name.to_string(), arity);
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(function) = current.functions.borrow().get(&key) {
                return Ok(Rc::clone(function));
            }
            scope = current.parent.as_deref();
        }
        Err(NameError::Function { name: key.0,
                                  arity })
    }

    /// Looks up the member table of a type, walking outwards through the
    /// parent chain.
    ///
    /// # Errors
    /// Returns [`NameError::Members`] if the type has no members registered.
    pub fn lookup_members(&self, ty: Type) -> Result<Rc<Self>, NameError> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(members) = current.members.borrow().get(&ty) {
                return Ok(Rc::clone(members));
            }
            scope = current.parent.as_deref();
        }
        Err(NameError::Members { type_name: ty.name().to_string() })
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variables = self.variables.borrow().keys().cloned().collect::<Vec<_>>();
        variables.sort();
        let mut functions = self.functions
                                .borrow()
                                .keys()
                                .map(|(name, arity)| format!("{name}/{arity}"))
                                .collect::<Vec<_>>();
        functions.sort();
        f.debug_struct("Scope")
         .field("variables", &variables)
         .field("functions", &functions)
         .field("has_parent", &self.parent.is_some())
         .finish()
    }
}
