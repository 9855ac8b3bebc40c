//! Program elements inspected by the binding rules.
//!
//! This module defines the read-only element model the validator consumes:
//!
//! - [`TypeElement`]: a class, interface or annotation type, stored in the
//!   [`crate::model::TypeRegistry`]
//! - [`MethodElement`]: a method-like declaration, the subject of a validation run
//! - [`ParameterElement`]: one formal parameter of a method
//! - [`Modifiers`]: visibility and abstract/concrete state
//!
//! Elements are plain data. Nothing in the validator mutates them, which is what allows one
//! subject to be validated from several threads at once.
//!
//! # Example
//!
//! ```rust
//! use bindscope::model::{known, MethodElement, Modifiers, TypeMirror, TypeRegistry};
//!
//! let registry = TypeRegistry::with_well_known_types()?;
//! let module = registry.class("app", "AppModule").annotated(known::MODULE).register()?;
//! let string = registry.class("app", "Greeting").register()?;
//!
//! let method = MethodElement::builder("provideGreeting", module)
//!     .annotated(known::PROVIDES)
//!     .modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
//!     .returns(TypeMirror::declared(string))
//!     .build();
//! assert!(method.parameters.is_empty());
//! # Ok::<(), bindscope::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use strum::{Display, FromRepr};

use crate::model::{AnnotationId, AnnotationMirror, TypeMirror, TypeToken};

/// A reference-counted pointer to a [`TypeElement`]
pub type TypeElementRc = Arc<TypeElement>;

/// The kind of a type element, stored in the high byte of its [`TypeToken`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromRepr)]
#[repr(u8)]
pub enum TypeElementKind {
    /// A class, abstract or concrete
    Class = 0x01,
    /// An interface
    Interface = 0x02,
    /// An annotation type
    Annotation = 0x03,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Declaration modifiers
    pub struct Modifiers: u32 {
        /// Accessible by anyone
        const PUBLIC = 0x0001;
        /// Accessible by the package and sub-types
        const PROTECTED = 0x0002;
        /// Accessible only by the declaring type
        const PRIVATE = 0x0004;
        /// No implementation
        const ABSTRACT = 0x0008;
        /// Not bound to an instance
        const STATIC = 0x0010;
        /// Cannot be overridden
        const FINAL = 0x0020;
        /// Interface method with a body
        const DEFAULT = 0x0040;
    }
}

impl Modifiers {
    /// Returns true if the declaration is private
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.contains(Modifiers::PRIVATE)
    }

    /// Returns true if the declaration is abstract
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }
}

/// A class, interface or annotation type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeElement {
    /// Token assigned on registration, null before
    pub token: TypeToken,
    /// Kind of the type
    pub kind: TypeElementKind,
    /// Enclosing package, may be empty
    pub package: String,
    /// Simple name
    pub name: String,
    /// Direct superclass, `None` for the root type and for interfaces
    pub superclass: Option<TypeToken>,
    /// Directly implemented or extended interfaces
    pub interfaces: Vec<TypeToken>,
    /// Annotations present on the type
    pub annotations: Vec<AnnotationMirror>,
    /// Modifiers of the type declaration
    pub modifiers: Modifiers,
}

impl TypeElement {
    /// Creates a new, not yet registered, type element
    #[must_use]
    pub fn new(kind: TypeElementKind, package: &str, name: &str) -> Self {
        TypeElement {
            token: TypeToken(0),
            kind,
            package: package.to_string(),
            name: name.to_string(),
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            modifiers: Modifiers::PUBLIC,
        }
    }

    /// Returns `package.name`, or `name` for the unnamed package
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Returns true if an annotation of the given type is present
    #[must_use]
    pub fn has_annotation(&self, annotation: &AnnotationId) -> bool {
        self.annotations.iter().any(|mirror| mirror.is(annotation))
    }

    /// Returns the direct supertypes, superclass first
    pub fn direct_supertypes(&self) -> impl Iterator<Item = TypeToken> + '_ {
        self.superclass.iter().copied().chain(self.interfaces.iter().copied())
    }
}

/// A formal parameter of a method
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterElement {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub ty: TypeMirror,
    /// Annotations present on the parameter
    pub annotations: Vec<AnnotationMirror>,
}

impl ParameterElement {
    /// Creates an unannotated parameter
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeMirror) -> Self {
        ParameterElement {
            name: name.into(),
            ty,
            annotations: Vec::new(),
        }
    }

    /// Adds an annotation
    #[must_use]
    pub fn annotated(mut self, annotation: impl Into<AnnotationMirror>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Returns the parameter type, the type a dependency request is made for
    #[must_use]
    pub fn as_type(&self) -> &TypeMirror {
        &self.ty
    }
}

/// A method-like declaration
#[derive(Debug, Clone, PartialEq)]
pub struct MethodElement {
    /// Method name
    pub name: String,
    /// The declaring type
    pub enclosing: TypeToken,
    /// Annotations present on the method itself
    pub annotations: Vec<AnnotationMirror>,
    /// Names of the declared type parameters, in declaration order
    pub type_parameters: Vec<String>,
    /// Modifiers of the declaration
    pub modifiers: Modifiers,
    /// Formal parameters, in declaration order
    pub parameters: Vec<ParameterElement>,
    /// Types listed in the `throws` clause, in declaration order
    pub thrown_types: Vec<TypeMirror>,
    /// Declared return type
    pub return_type: TypeMirror,
}

impl MethodElement {
    /// Starts building a method declared in `enclosing`
    #[must_use]
    pub fn builder(name: &str, enclosing: TypeToken) -> MethodElementBuilder {
        MethodElementBuilder::new(name, enclosing)
    }

    /// Returns true if an annotation of the given type is present on the method
    #[must_use]
    pub fn has_annotation(&self, annotation: &AnnotationId) -> bool {
        self.annotations.iter().any(|mirror| mirror.is(annotation))
    }
}

impl fmt::Display for MethodElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter.ty)?;
        }
        write!(f, ")")
    }
}

/// Provides a fluent API for building method declarations
pub struct MethodElementBuilder {
    method: MethodElement,
}

impl MethodElementBuilder {
    /// Create a new builder for a public, concrete, parameterless method returning `void`
    ///
    /// ## Arguments
    /// * 'name'      - Name of the method
    /// * 'enclosing' - Token of the declaring type
    #[must_use]
    pub fn new(name: &str, enclosing: TypeToken) -> Self {
        MethodElementBuilder {
            method: MethodElement {
                name: name.to_string(),
                enclosing,
                annotations: Vec::new(),
                type_parameters: Vec::new(),
                modifiers: Modifiers::PUBLIC,
                parameters: Vec::new(),
                thrown_types: Vec::new(),
                return_type: TypeMirror::Void,
            },
        }
    }

    /// Add an annotation to the method
    #[must_use]
    pub fn annotated(mut self, annotation: impl Into<AnnotationMirror>) -> Self {
        self.method.annotations.push(annotation.into());
        self
    }

    /// Replace the modifier set
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.method.modifiers = modifiers;
        self
    }

    /// Add a type parameter
    #[must_use]
    pub fn type_parameter(mut self, name: &str) -> Self {
        self.method.type_parameters.push(name.to_string());
        self
    }

    /// Add a formal parameter
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterElement) -> Self {
        self.method.parameters.push(parameter);
        self
    }

    /// Add a type to the `throws` clause
    #[must_use]
    pub fn throws(mut self, thrown: TypeMirror) -> Self {
        self.method.thrown_types.push(thrown);
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, return_type: TypeMirror) -> Self {
        self.method.return_type = return_type;
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> MethodElement {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{known, PrimitiveKind};

    #[test]
    fn test_modifier_predicates() {
        let modifiers = Modifiers::PRIVATE | Modifiers::ABSTRACT;
        assert!(modifiers.is_private());
        assert!(modifiers.is_abstract());
        assert!(!Modifiers::PUBLIC.is_private());
        assert!(!Modifiers::default().is_abstract());
    }

    #[test]
    fn test_qualified_name() {
        let element = TypeElement::new(TypeElementKind::Class, "com.example", "Thing");
        assert_eq!(element.qualified_name(), "com.example.Thing");

        let unnamed = TypeElement::new(TypeElementKind::Interface, "", "Root");
        assert_eq!(unnamed.qualified_name(), "Root");
    }

    #[test]
    fn test_direct_supertypes_order() {
        let mut element = TypeElement::new(TypeElementKind::Class, "p", "C");
        element.superclass = Some(TypeToken(0x0100_0001));
        element.interfaces = vec![TypeToken(0x0200_0002), TypeToken(0x0200_0003)];

        let supertypes: Vec<_> = element.direct_supertypes().collect();
        assert_eq!(
            supertypes,
            vec![TypeToken(0x0100_0001), TypeToken(0x0200_0002), TypeToken(0x0200_0003)]
        );
    }

    #[test]
    fn test_method_builder() {
        let enclosing = TypeToken(0x0100_0010);
        let method = MethodElement::builder("provideCount", enclosing)
            .annotated(known::PROVIDES)
            .modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
            .type_parameter("T")
            .parameter(ParameterElement::new("seed", TypeMirror::Primitive(PrimitiveKind::Long)))
            .returns(TypeMirror::Primitive(PrimitiveKind::Int))
            .build();

        assert_eq!(method.enclosing, enclosing);
        assert!(method.has_annotation(&known::PROVIDES));
        assert!(!method.has_annotation(&known::BINDS));
        assert_eq!(method.type_parameters, vec!["T".to_string()]);
        assert_eq!(method.to_string(), "provideCount(long)");
    }
}
