//! The questions the binding rules ask about the surrounding compilation environment.
//!
//! The validator never walks type hierarchies or annotation lists of foreign elements on its
//! own. It goes through two narrow oracles:
//!
//! - [`AnnotationLookup`]: annotation presence on type elements and meta-annotation presence on
//!   annotation types
//! - [`TypeHierarchy`]: subtype relation and resolution of [`WellKnownType`]s
//!
//! [`Environment`] is the union of both and is what validators accept. The in-memory
//! [`crate::model::TypeRegistry`] implements it; a host compiler front end implements it over
//! its own symbol tables.
//!
//! # Thread Safety
//!
//! [`Environment`] requires [`Send`] + [`Sync`] so that one environment can serve parallel
//! validation runs.

use strum::{Display, EnumIter, IntoStaticStr};

use crate::{
    model::{AnnotationId, AnnotationMirror, TypeMirror, TypeToken},
    Error, Result,
};

/// Types the rules need to resolve from the environment by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum WellKnownType {
    /// Root of the class hierarchy
    #[strum(serialize = "java.lang.Object")]
    Object,
    /// Root of everything that can be thrown
    #[strum(serialize = "java.lang.Throwable")]
    Throwable,
    /// Base of checked exceptions
    #[strum(serialize = "java.lang.Exception")]
    Exception,
    /// Base of unchecked exceptions
    #[strum(serialize = "java.lang.RuntimeException")]
    RuntimeException,
    /// Base of errors, never part of a checked-exception contract
    #[strum(serialize = "java.lang.Error")]
    Error,
    /// Set collection interface
    #[strum(serialize = "java.util.Set")]
    Set,
    /// Map collection interface
    #[strum(serialize = "java.util.Map")]
    Map,
    /// Deferred provisioning
    #[strum(serialize = "javax.inject.Provider")]
    Provider,
    /// Lazily computed, memoized value
    #[strum(serialize = "di.Lazy")]
    Lazy,
    /// Injector of members into an existing instance
    #[strum(serialize = "di.MembersInjector")]
    MembersInjector,
    /// Asynchronous provisioning
    #[strum(serialize = "di.producers.Producer")]
    Producer,
    /// Result of an asynchronous provisioning
    #[strum(serialize = "di.producers.Produced")]
    Produced,
}

impl WellKnownType {
    /// Types which are part of the injection framework itself
    pub const FRAMEWORK_TYPES: [WellKnownType; 5] = [
        WellKnownType::Provider,
        WellKnownType::Lazy,
        WellKnownType::MembersInjector,
        WellKnownType::Producer,
        WellKnownType::Produced,
    ];

    /// Returns the qualified name
    #[must_use]
    pub fn qualified_name(self) -> &'static str {
        self.into()
    }

    /// Returns the package and simple name
    #[must_use]
    pub fn split_name(self) -> (&'static str, &'static str) {
        self.qualified_name()
            .rsplit_once('.')
            .unwrap_or(("", self.qualified_name()))
    }

    /// Returns the simple name
    #[must_use]
    pub fn simple_name(self) -> &'static str {
        self.split_name().1
    }
}

/// Annotation presence queries
pub trait AnnotationLookup {
    /// Returns true if the type element carries at least one of `annotations`.
    ///
    /// Unknown elements carry no annotations.
    fn has_any_annotation(&self, element: TypeToken, annotations: &[AnnotationId]) -> bool;

    /// Returns true if the annotation type `annotation` is itself annotated with `meta`.
    ///
    /// This is how qualifiers, scopes and map keys are recognized.
    fn is_annotated_with(&self, annotation: &AnnotationId, meta: &AnnotationId) -> bool;

    /// Filters `annotations` down to those whose type carries `meta`, keeping their order
    fn annotations_with_meta<'a>(
        &self,
        annotations: &'a [AnnotationMirror],
        meta: &AnnotationId,
    ) -> Vec<&'a AnnotationMirror> {
        annotations
            .iter()
            .filter(|mirror| self.is_annotated_with(&mirror.annotation, meta))
            .collect()
    }
}

/// Type relation queries
pub trait TypeHierarchy {
    /// Returns true if `sub` is a subtype of `sup`. Every type is a subtype of itself.
    fn is_subtype(&self, sub: &TypeMirror, sup: &TypeMirror) -> bool;

    /// Returns true if a value of type `from` can be assigned to a location of type `to`
    fn is_assignable(&self, from: &TypeMirror, to: &TypeMirror) -> bool {
        self.is_subtype(from, to)
    }

    /// Looks up a well-known type, `None` if the environment does not know it
    fn lookup_well_known(&self, ty: WellKnownType) -> Option<TypeMirror>;

    /// Resolves a well-known type the rules cannot do without
    ///
    /// # Errors
    /// Returns [`Error::WellKnownTypeMissing`] if the environment cannot resolve `ty`.
    fn resolve_well_known(&self, ty: WellKnownType) -> Result<TypeMirror> {
        self.lookup_well_known(ty)
            .ok_or(Error::WellKnownTypeMissing(ty))
    }

    /// Returns true if `candidate` is a use of the well-known type, with or without arguments
    fn is_well_known(&self, candidate: &TypeMirror, ty: WellKnownType) -> bool {
        match (candidate.element(), self.lookup_well_known(ty)) {
            (Some(element), Some(known)) => known.element() == Some(element),
            _ => false,
        }
    }

    /// Returns the qualified name of a type element
    fn qualified_name(&self, element: TypeToken) -> Option<String>;

    /// Renders a type for use in a diagnostic message
    fn render(&self, ty: &TypeMirror) -> String {
        ty.to_string()
    }
}

/// Everything a binding validator needs from its environment
pub trait Environment: AnnotationLookup + TypeHierarchy + Send + Sync {}

impl<T> Environment for T where T: AnnotationLookup + TypeHierarchy + Send + Sync + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_well_known_names() {
        assert_eq!(WellKnownType::Exception.qualified_name(), "java.lang.Exception");
        assert_eq!(WellKnownType::Exception.simple_name(), "Exception");
        assert_eq!(WellKnownType::Producer.split_name(), ("di.producers", "Producer"));
        assert_eq!(WellKnownType::Error.to_string(), "java.lang.Error");
    }

    #[test]
    fn test_well_known_names_unique() {
        let mut names: Vec<_> = WellKnownType::iter().map(WellKnownType::qualified_name).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_framework_types_are_framework() {
        assert!(!WellKnownType::FRAMEWORK_TYPES.contains(&WellKnownType::Set));
        assert!(WellKnownType::FRAMEWORK_TYPES.contains(&WellKnownType::Lazy));
    }
}
