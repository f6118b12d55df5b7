use std::rc::Rc;

use crate::{
    ast::{Field, Method, Source},
    error::TypeError,
    interpreter::{
        scope::{Callable, Function, Scope},
        types::{Type, require_assignable},
        value::Value,
    },
};

/// Result type used by the analyzer.
pub type TypeResult<T> = Result<T, TypeError>;

/// Context of the method whose body is being checked.
pub(in crate::interpreter::analyzer) struct MethodFrame<'m> {
    /// Name of the method, used in error messages.
    pub name:        &'m str,
    /// Declared return type, `None` if the method declares none.
    pub return_type: Option<Type>,
}

/// The static checker.
///
/// The analyzer walks a parsed [`Source`], resolves the type of every
/// expression and the binding of every name, and records both in the tree's
/// decoration slots. The first violated rule aborts the check.
///
/// Scopes are passed explicitly from visit to visit; the analyzer itself only
/// owns the program's global scope, a child of the caller-supplied parent.
pub struct Analyzer {
    scope: Rc<Scope>,
}

impl Analyzer {
    /// Creates an analyzer whose global scope is a child of `parent`.
    ///
    /// Built-ins such as `print` are expected to be defined in `parent`.
    #[must_use]
    pub fn new(parent: &Rc<Scope>) -> Self {
        Self { scope: parent.child() }
    }

    /// Returns the program's global scope.
    ///
    /// After a successful check it holds the fields and method signatures of
    /// the program.
    #[must_use]
    pub const fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    /// Checks a whole program.
    ///
    /// Fields are visited first, then methods. Once everything is visited a
    /// zero-argument `main` returning `Integer` must be resolvable.
    ///
    /// # Errors
    /// Returns the first [`TypeError`] found.
    ///
    /// # Example
    /// ```
    /// use lectern::interpreter::{
    ///     analyzer::core::Analyzer, lexer::tokenize, parser::core::parse, prelude,
    ///     types::Type,
    /// };
    ///
    /// let tokens = tokenize("LET x: Integer = 5; DEF main(): Integer DO RETURN x; END").unwrap();
    /// let source = parse(&tokens).unwrap();
    ///
    /// let analyzer = Analyzer::new(&prelude::global_scope());
    /// analyzer.check(&source).unwrap();
    ///
    /// assert_eq!(analyzer.scope().lookup_variable("x").unwrap().ty(), Type::Integer);
    /// ```
    pub fn check(&self, source: &Source) -> TypeResult<()> {
        for field in &source.fields {
            self.visit_field(field)?;
        }
        for method in &source.methods {
            self.visit_method(method)?;
        }

        match self.scope.lookup_function("main", 0) {
            Ok(main) if main.return_type() == Type::Integer => {
                tracing::debug!(fields = source.fields.len(),
                                methods = source.methods.len(),
                                "source checked");
                Ok(())
            },
            _ => Err(TypeError::MissingMain),
        }
    }

    fn visit_field(&self, field: &Field) -> TypeResult<()> {
        if field.constant && field.initializer.is_none() {
            return Err(TypeError::UninitializedConstant { name:   field.name.clone(),
                                                          offset: field.offset, });
        }

        let ty = self.declared_type(&field.name,
                                    field.type_name.as_deref(),
                                    field.initializer.as_ref(),
                                    field.offset,
                                    &self.scope)?;
        let variable = self.scope
                           .define_variable(&field.name, ty, field.constant, Value::Nil);
        field.variable.resolve(variable);
        Ok(())
    }

    fn visit_method(&self, method: &Rc<Method>) -> TypeResult<()> {
        let parameter_types = method.parameter_types
                                    .iter()
                                    .map(|name| resolve_type_name(name, method.offset))
                                    .collect::<TypeResult<Vec<_>>>()?;
        let return_type = method.return_type
                                .as_deref()
                                .map(|name| resolve_type_name(name, method.offset))
                                .transpose()?;

        // Declared before the body is visited so the method can call itself.
        let function = self.scope
                           .define_function(Function::new(&method.name,
                                                          parameter_types.clone(),
                                                          return_type.unwrap_or(Type::Nil),
                                                          Callable::Signature));
        // A field or an earlier overload keeps the name.
        if !self.scope.defines_variable(&method.name) {
            self.scope
                .define_variable(&method.name, Type::Any, true, Value::Nil);
        }
        method.function.resolve(function);

        tracing::trace!(method = %method.name, "checking method");
        let scope = self.scope.child();
        for (name, ty) in method.parameters.iter().zip(parameter_types) {
            scope.define_variable(name, ty, false, Value::Nil);
        }

        let frame = MethodFrame { name: &method.name,
                                  return_type };
        self.visit_block(&method.body, &scope, &frame)
    }

    /// Resolves the static type of a field or declaration.
    ///
    /// The declared type wins when present and the initializer must be
    /// assignable to it; otherwise the initializer's type is used.
    pub(in crate::interpreter::analyzer) fn declared_type(
        &self,
        name: &str,
        type_name: Option<&str>,
        initializer: Option<&crate::ast::Expression>,
        offset: usize,
        scope: &Rc<Scope>)
        -> TypeResult<Type> {
        let declared = type_name.map(|name| resolve_type_name(name, offset))
                                .transpose()?;
        let initialized = match initializer {
            Some(expression) => Some((self.visit_expression(expression, scope)?, expression.offset)),
            None => None,
        };

        match (declared, initialized) {
            (Some(declared), Some((found, at))) => {
                require_assignable(declared, found, at)?;
                Ok(declared)
            },
            (Some(declared), None) => Ok(declared),
            (None, Some((found, _))) => Ok(found),
            (None, None) => Err(TypeError::UntypedDeclaration { name: name.to_string(),
                                                                offset }),
        }
    }
}

/// Maps a type name as written in source to its static type.
///
/// # Errors
/// Returns [`TypeError::UnknownType`] for names that are not types.
pub fn resolve_type_name(name: &str, offset: usize) -> TypeResult<Type> {
    Type::from_name(name).ok_or_else(|| TypeError::UnknownType { name: name.to_string(),
                                                                 offset })
}

/// Checks a program against the built-ins of `parent`.
///
/// # Errors
/// Returns the first [`TypeError`] found.
pub fn check(source: &Source, parent: &Rc<Scope>) -> TypeResult<()> {
    Analyzer::new(parent).check(source)
}
