//! Annotation identities and the annotations the binding rules know about.
//!
//! An [`AnnotationId`] is the qualified name of an annotation type. Rules compare annotations
//! by identity only; whether an annotation is a qualifier, a scope or a map key is decided by
//! the meta-annotations on its declaring type, see
//! [`crate::model::AnnotationLookup::is_annotated_with`].
//!
//! The [`known`] module lists the identities the validator and its presets reference.

use std::borrow::Cow;
use std::fmt;

/// Qualified name of an annotation type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(Cow<'static, str>);

impl AnnotationId {
    /// Creates an identity from a static qualified name
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        AnnotationId(Cow::Borrowed(name))
    }

    /// Creates an identity from an owned qualified name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        AnnotationId(Cow::Owned(name.into()))
    }

    /// Returns the qualified name
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.0
    }

    /// Returns the simple name, the part after the last `.`
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<&'static str> for AnnotationId {
    fn from(name: &'static str) -> Self {
        AnnotationId::from_static(name)
    }
}

/// An annotation present on an element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationMirror {
    /// Identity of the annotation type
    pub annotation: AnnotationId,
    /// Element values as written, in declaration order
    pub values: Vec<(String, String)>,
}

impl AnnotationMirror {
    /// Creates an annotation without element values
    #[must_use]
    pub fn new(annotation: AnnotationId) -> Self {
        AnnotationMirror {
            annotation,
            values: Vec::new(),
        }
    }

    /// Adds an element value
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    /// Returns true if this is an annotation of the given type
    #[must_use]
    pub fn is(&self, annotation: &AnnotationId) -> bool {
        &self.annotation == annotation
    }
}

impl From<AnnotationId> for AnnotationMirror {
    fn from(annotation: AnnotationId) -> Self {
        AnnotationMirror::new(annotation)
    }
}

/// Annotation identities referenced by the binding rules
pub mod known {
    use super::AnnotationId;

    /// Meta-annotation marking qualifier annotations
    pub const QUALIFIER: AnnotationId = AnnotationId::from_static("javax.inject.Qualifier");
    /// Meta-annotation marking scope annotations
    pub const SCOPE: AnnotationId = AnnotationId::from_static("javax.inject.Scope");
    /// Meta-annotation marking map key annotations
    pub const MAP_KEY: AnnotationId = AnnotationId::from_static("di.MapKey");

    /// Standard scope
    pub const SINGLETON: AnnotationId = AnnotationId::from_static("javax.inject.Singleton");
    /// Standard qualifier
    pub const NAMED: AnnotationId = AnnotationId::from_static("javax.inject.Named");

    /// Marks a type as a module of bindings
    pub const MODULE: AnnotationId = AnnotationId::from_static("di.Module");
    /// Marks a type as a module of asynchronous bindings
    pub const PRODUCER_MODULE: AnnotationId = AnnotationId::from_static("di.producers.ProducerModule");

    /// Concrete method providing a value
    pub const PROVIDES: AnnotationId = AnnotationId::from_static("di.Provides");
    /// Abstract method delegating one binding to another
    pub const BINDS: AnnotationId = AnnotationId::from_static("di.Binds");
    /// Abstract method declaring a possibly empty multibound collection
    pub const MULTIBINDS: AnnotationId = AnnotationId::from_static("di.multibindings.Multibinds");
    /// Asynchronous producer method
    pub const PRODUCES: AnnotationId = AnnotationId::from_static("di.producers.Produces");

    /// Contributes the returned value to a set
    pub const INTO_SET: AnnotationId = AnnotationId::from_static("di.multibindings.IntoSet");
    /// Contributes all elements of the returned set
    pub const ELEMENTS_INTO_SET: AnnotationId =
        AnnotationId::from_static("di.multibindings.ElementsIntoSet");
    /// Contributes the returned value to a map
    pub const INTO_MAP: AnnotationId = AnnotationId::from_static("di.multibindings.IntoMap");

    /// Standard map key carrying a string
    pub const STRING_KEY: AnnotationId = AnnotationId::from_static("di.multibindings.StringKey");

    /// All multibinding contribution annotations
    pub const MULTIBINDING_ANNOTATIONS: [AnnotationId; 3] = [INTO_SET, ELEMENTS_INTO_SET, INTO_MAP];
}
