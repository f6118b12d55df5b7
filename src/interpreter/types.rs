use std::fmt;

use crate::error::TypeError;

/// A static type.
///
/// The types form a small lattice rather than a class tree: `Any` sits above
/// everything, `Comparable` sits above the four ordered types, and every other
/// type is only related to itself.
///
/// ```text
///                 Any
///        /    /    |         \
///     Nil Boolean Comparable
///            /     |     \      \
///      Integer Decimal Character String
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// The type of `NIL` results, such as calls to methods without a return
    /// type.
    Nil,
    /// `TRUE` and `FALSE`.
    Boolean,
    /// Integral numbers.
    Integer,
    /// Decimal numbers.
    Decimal,
    /// A single character.
    Character,
    /// Character strings.
    String,
    /// Supertype of the ordered types.
    Comparable,
    /// Supertype of all types.
    Any,
}

/// Every type, in declaration order.
pub const ALL_TYPES: [Type; 8] = [Type::Nil,
                                  Type::Boolean,
                                  Type::Integer,
                                  Type::Decimal,
                                  Type::Character,
                                  Type::String,
                                  Type::Comparable,
                                  Type::Any];

/// Direct supertype edges of the lattice, as `(subtype, supertype)`.
const SUPERTYPES: &[(Type, Type)] = &[(Type::Nil, Type::Any),
                                      (Type::Boolean, Type::Any),
                                      (Type::Comparable, Type::Any),
                                      (Type::Integer, Type::Comparable),
                                      (Type::Decimal, Type::Comparable),
                                      (Type::Character, Type::Comparable),
                                      (Type::String, Type::Comparable)];

impl Type {
    /// Resolves a type name as written in source, such as `Integer`.
    ///
    /// # Example
    /// ```
    /// use lectern::interpreter::types::Type;
    ///
    /// assert_eq!(Type::from_name("Decimal"), Some(Type::Decimal));
    /// assert_eq!(Type::from_name("Float"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_TYPES.into_iter().find(|ty| ty.name() == name)
    }

    /// Returns the source-level name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Decimal => "Decimal",
            Self::Character => "Character",
            Self::String => "String",
            Self::Comparable => "Comparable",
            Self::Any => "Any",
        }
    }

    /// Returns `true` if `self` is `other` or lies below it in the lattice.
    ///
    /// The relation is reflexive and transitive, so `Integer` is a subtype of
    /// `Integer`, `Comparable` and `Any`.
    #[must_use]
    pub fn is_subtype_of(self, other: Self) -> bool {
        if self == other {
            return true;
        }
        SUPERTYPES.iter()
                  .filter(|(sub, _)| *sub == self)
                  .any(|(_, sup)| sup.is_subtype_of(other))
    }

    /// Returns `true` if a value of type `source` may be used where `self` is
    /// expected.
    ///
    /// # Example
    /// ```
    /// use lectern::interpreter::types::Type;
    ///
    /// assert!(Type::Comparable.is_assignable_from(Type::Integer));
    /// assert!(Type::Any.is_assignable_from(Type::Nil));
    /// assert!(!Type::Integer.is_assignable_from(Type::Decimal));
    /// assert!(!Type::Boolean.is_assignable_from(Type::Integer));
    /// ```
    #[must_use]
    pub fn is_assignable_from(self, source: Self) -> bool {
        source.is_subtype_of(self)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requires that a value of type `source` can be used where `target` is
/// expected.
///
/// # Errors
/// Returns [`TypeError::NotAssignable`] pointing at `offset` otherwise.
pub fn require_assignable(target: Type, source: Type, offset: usize) -> Result<(), TypeError> {
    if target.is_assignable_from(source) {
        Ok(())
    } else {
        Err(TypeError::NotAssignable { expected: target,
                                       found: source,
                                       offset })
    }
}
