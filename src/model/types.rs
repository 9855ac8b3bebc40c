//! Type references as seen by the validator.
//!
//! A [`TypeMirror`] is a use of a type: the return type of a method, the type of a parameter,
//! one entry of a `throws` clause. Declared types point at their element through a
//! [`TypeToken`] and carry their type arguments inline, so mirrors stay independent of the
//! registry that produced them.
//!
//! # Key Types
//! - [`TypeMirror`]: The type reference itself
//! - [`PrimitiveKind`]: The eight primitive value types

use std::fmt;

use strum::{Display, EnumIter, EnumString};

use crate::model::TypeToken;

/// Primitive value types of the host type system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    /// true / false
    Boolean,
    /// signed 8bit integer
    Byte,
    /// signed 16bit integer
    Short,
    /// signed 32bit integer
    Int,
    /// signed 64bit integer
    Long,
    /// 16bit unicode code unit
    Char,
    /// 32bit floating-point
    Float,
    /// 64bit floating-point
    Double,
}

/// A reference to a type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeMirror {
    /// No value, only legal as a return type
    Void,
    /// A primitive value type
    Primitive(PrimitiveKind),
    /// A class, interface or annotation type, optionally parameterized
    Declared {
        /// The declaring type element
        element: TypeToken,
        /// Type arguments, empty for raw or non-generic uses
        arguments: Vec<TypeMirror>,
    },
    /// An array with the given component type
    Array(Box<TypeMirror>),
    /// A type variable, identified by name
    TypeVariable(String),
    /// A wildcard type argument
    Wildcard {
        /// Upper bound (`? extends T`)
        extends: Option<Box<TypeMirror>>,
        /// Lower bound (`? super T`)
        super_bound: Option<Box<TypeMirror>>,
    },
    #[default]
    /// A type that could not be resolved
    Error,
}

impl TypeMirror {
    /// Creates a non-parameterized declared type
    #[must_use]
    pub fn declared(element: TypeToken) -> Self {
        TypeMirror::Declared {
            element,
            arguments: Vec::new(),
        }
    }

    /// Creates a parameterized declared type
    #[must_use]
    pub fn parameterized(element: TypeToken, arguments: Vec<TypeMirror>) -> Self {
        TypeMirror::Declared { element, arguments }
    }

    /// Creates an array type of `component`
    #[must_use]
    pub fn array_of(component: TypeMirror) -> Self {
        TypeMirror::Array(Box::new(component))
    }

    /// Creates an unbounded wildcard (`?`)
    #[must_use]
    pub fn wildcard() -> Self {
        TypeMirror::Wildcard {
            extends: None,
            super_bound: None,
        }
    }

    /// Creates an upper bounded wildcard (`? extends bound`)
    #[must_use]
    pub fn wildcard_extends(bound: TypeMirror) -> Self {
        TypeMirror::Wildcard {
            extends: Some(Box::new(bound)),
            super_bound: None,
        }
    }

    /// Returns the declaring element of a declared type
    #[must_use]
    pub fn element(&self) -> Option<TypeToken> {
        match self {
            TypeMirror::Declared { element, .. } => Some(*element),
            _ => None,
        }
    }

    /// Returns the type arguments of a declared type, empty for everything else
    #[must_use]
    pub fn arguments(&self) -> &[TypeMirror] {
        match self {
            TypeMirror::Declared { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Returns true for `void`
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, TypeMirror::Void)
    }

    /// Returns true for primitive value types
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeMirror::Primitive(_))
    }

    /// Returns true for wildcard type arguments
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TypeMirror::Wildcard { .. })
    }

    /// Returns true for types whose values are references (declared, array, type variable)
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            TypeMirror::Declared { .. } | TypeMirror::Array(_) | TypeMirror::TypeVariable(_)
        )
    }

    /// Returns true if this is a declared type of `element` without type arguments
    #[must_use]
    pub fn is_raw_of(&self, element: TypeToken) -> bool {
        matches!(self, TypeMirror::Declared { element: e, arguments } if *e == element && arguments.is_empty())
    }

    /// Returns true if this is a declared type of `element`, regardless of type arguments
    #[must_use]
    pub fn erases_to(&self, element: TypeToken) -> bool {
        self.element() == Some(element)
    }
}

impl fmt::Display for TypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMirror::Void => write!(f, "void"),
            TypeMirror::Primitive(kind) => write!(f, "{kind}"),
            TypeMirror::Declared { element, arguments } => {
                write!(f, "{element}")?;
                if !arguments.is_empty() {
                    write!(f, "<")?;
                    for (index, argument) in arguments.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeMirror::Array(component) => write!(f, "{component}[]"),
            TypeMirror::TypeVariable(name) => write!(f, "{name}"),
            TypeMirror::Wildcard {
                extends,
                super_bound,
            } => {
                write!(f, "?")?;
                if let Some(bound) = extends {
                    write!(f, " extends {bound}")?;
                }
                if let Some(bound) = super_bound {
                    write!(f, " super {bound}")?;
                }
                Ok(())
            }
            TypeMirror::Error => write!(f, "<error>"),
        }
    }
}
