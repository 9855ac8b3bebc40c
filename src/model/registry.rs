//! In-memory type registry implementing the validation [`Environment`].
//!
//! This module provides the [`TypeRegistry`], a thread-safe store of [`TypeElement`]s which
//! answers the annotation and subtype questions the binding rules ask. It stands in for the
//! symbol tables of a host compiler: tools embedding the validator can populate it directly,
//! and the test-suites use it to model small programs.
//!
//! # Registry Architecture
//!
//! - **Token-based storage**: Primary index using [`TypeToken`]s (`SkipMap`)
//! - **Name-based lookup**: Secondary index from qualified name to token (`DashMap`)
//! - **Token generation**: Atomic row counter, the element kind lives in the token's high byte
//!
//! # Subtyping
//!
//! Declared types are related by walking superclass and interface edges breadth-first. A
//! visited set bounds the walk, so malformed cyclic hierarchies terminate instead of looping.
//! Every reference type is a subtype of `java.lang.Object`. Parameterized supertypes are only
//! matched by the identical parameterization, since type arguments of supertypes are not
//! recorded. Arrays are covariant over reference components.
//!
//! # Examples
//!
//! ```rust
//! use bindscope::model::{known, TypeHierarchy, TypeMirror, TypeRegistry, WellKnownType};
//!
//! let registry = TypeRegistry::with_well_known_types()?;
//! let exception = registry.resolve_well_known(WellKnownType::Exception)?;
//! let io = registry.class("java.io", "IOException").extends_type(&exception).register()?;
//!
//! assert!(registry.is_subtype(&TypeMirror::declared(io), &exception));
//! # Ok::<(), bindscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! All operations take `&self`. Registration and lookup may run concurrently from any
//! number of threads.

use std::collections::{HashSet, VecDeque};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::{mapref::entry::Entry, DashMap};
use strum::IntoEnumIterator;

use crate::{
    model::{
        known, AnnotationId, AnnotationLookup, AnnotationMirror, Modifiers, TypeElement,
        TypeElementKind, TypeElementRc, TypeHierarchy, TypeMirror, TypeToken, WellKnownType,
    },
    Error::{TypeInsert, TypeNotFound},
    Result,
};

/// Central registry of all type elements known to a validation environment
pub struct TypeRegistry {
    /// Primary type storage indexed by token
    types: SkipMap<TypeToken, TypeElementRc>,
    /// Secondary index: qualified name to token
    types_by_fullname: DashMap<String, TypeToken>,
    /// Atomic counter for the row part of new tokens
    next_row: AtomicU32,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a new, empty registry.
    ///
    /// An empty registry resolves no well-known types, so validating exception rules
    /// against it fails with [`crate::Error::WellKnownTypeMissing`].
    #[must_use]
    pub fn new() -> Self {
        TypeRegistry {
            types: SkipMap::new(),
            types_by_fullname: DashMap::new(),
            next_row: AtomicU32::new(1),
        }
    }

    /// Create a registry seeded with every [`WellKnownType`] and the standard annotations.
    ///
    /// Seeded hierarchy:
    /// - `Object`
    /// - `Throwable` extends `Object`
    /// - `Exception` extends `Throwable`, `RuntimeException` extends `Exception`
    /// - `Error` extends `Throwable`
    /// - `Set`, `Map`, `Provider`, `Lazy`, `MembersInjector`, `Producer` interfaces
    /// - `Produced` abstract class
    ///
    /// Seeded annotation types: the meta-annotations `Qualifier`, `Scope` and `MapKey`, the
    /// qualifier `Named`, the scope `Singleton`, the map key `StringKey`, the module and binding
    /// method markers, and the multibinding contribution markers.
    ///
    /// # Errors
    /// Returns an error if a seeded name collides, which only happens on a programming error.
    pub fn with_well_known_types() -> Result<Self> {
        let registry = TypeRegistry::new();

        let (package, name) = WellKnownType::Object.split_name();
        let object = registry.class(package, name).register()?;

        for well_known in WellKnownType::iter() {
            let (package, name) = well_known.split_name();
            match well_known {
                WellKnownType::Object => {}
                WellKnownType::Throwable => {
                    registry.class(package, name).extends(object).register()?;
                }
                WellKnownType::Exception | WellKnownType::Error => {
                    let throwable = registry.require_well_known(WellKnownType::Throwable)?;
                    registry.class(package, name).extends(throwable).register()?;
                }
                WellKnownType::RuntimeException => {
                    let exception = registry.require_well_known(WellKnownType::Exception)?;
                    registry.class(package, name).extends(exception).register()?;
                }
                WellKnownType::Produced => {
                    registry
                        .class(package, name)
                        .extends(object)
                        .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                        .register()?;
                }
                WellKnownType::Set
                | WellKnownType::Map
                | WellKnownType::Provider
                | WellKnownType::Lazy
                | WellKnownType::MembersInjector
                | WellKnownType::Producer => {
                    registry.interface(package, name).register()?;
                }
            }
        }

        for meta in [known::QUALIFIER, known::SCOPE, known::MAP_KEY] {
            registry.annotation_type(&meta).register()?;
        }
        registry
            .annotation_type(&known::NAMED)
            .annotated(known::QUALIFIER)
            .register()?;
        registry
            .annotation_type(&known::SINGLETON)
            .annotated(known::SCOPE)
            .register()?;
        registry
            .annotation_type(&known::STRING_KEY)
            .annotated(known::MAP_KEY)
            .register()?;

        for marker in [
            known::MODULE,
            known::PRODUCER_MODULE,
            known::PROVIDES,
            known::BINDS,
            known::MULTIBINDS,
            known::PRODUCES,
            known::INTO_SET,
            known::ELEMENTS_INTO_SET,
            known::INTO_MAP,
        ] {
            registry.annotation_type(&marker).register()?;
        }

        Ok(registry)
    }

    /// Start building a class
    ///
    /// ## Arguments
    /// * 'package' - Package of the class, may be empty
    /// * 'name'    - Simple name of the class
    pub fn class(&self, package: &str, name: &str) -> TypeElementBuilder<'_> {
        TypeElementBuilder::new(self, TypeElement::new(TypeElementKind::Class, package, name))
    }

    /// Start building an interface
    ///
    /// ## Arguments
    /// * 'package' - Package of the interface, may be empty
    /// * 'name'    - Simple name of the interface
    pub fn interface(&self, package: &str, name: &str) -> TypeElementBuilder<'_> {
        TypeElementBuilder::new(
            self,
            TypeElement::new(TypeElementKind::Interface, package, name),
        )
    }

    /// Start building the annotation type declaring `annotation`
    pub fn annotation_type(&self, annotation: &AnnotationId) -> TypeElementBuilder<'_> {
        let (package, name) = annotation
            .qualified_name()
            .rsplit_once('.')
            .unwrap_or(("", annotation.qualified_name()));
        TypeElementBuilder::new(
            self,
            TypeElement::new(TypeElementKind::Annotation, package, name),
        )
    }

    /// Register a type element, assigning its token.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeInsert`] if the qualified name is already registered.
    pub fn register(&self, mut element: TypeElement) -> Result<TypeToken> {
        let fullname = element.qualified_name();
        match self.types_by_fullname.entry(fullname) {
            Entry::Occupied(occupied) => Err(TypeInsert(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                let row = self.next_row.fetch_add(1, Ordering::Relaxed);
                let token = TypeToken::from_parts(element.kind, row);
                element.token = token;
                self.types.insert(token, Arc::new(element));
                vacant.insert(token);
                Ok(token)
            }
        }
    }

    /// Get a type element by token
    #[must_use]
    pub fn get(&self, token: &TypeToken) -> Option<TypeElementRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Get a type element by token, failing if it is not registered
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] for unregistered tokens.
    pub fn require(&self, token: &TypeToken) -> Result<TypeElementRc> {
        self.get(token).ok_or(TypeNotFound(*token))
    }

    /// Get a type element by qualified name
    #[must_use]
    pub fn get_by_fullname(&self, fullname: &str) -> Option<TypeElementRc> {
        let token = *self.types_by_fullname.get(fullname)?.value();
        self.get(&token)
    }

    /// Returns the number of registered type elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type element is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns all registered type elements in token order
    #[must_use]
    pub fn all_types(&self) -> Vec<TypeElementRc> {
        self.types.iter().map(|entry| entry.value().clone()).collect()
    }

    fn require_well_known(&self, ty: WellKnownType) -> Result<TypeToken> {
        self.get_by_fullname(ty.qualified_name())
            .map(|element| element.token)
            .ok_or(crate::Error::WellKnownTypeMissing(ty))
    }

    fn is_object(&self, token: TypeToken) -> bool {
        self.types_by_fullname
            .get(WellKnownType::Object.qualified_name())
            .is_some_and(|entry| *entry.value() == token)
    }

    /// Returns true if `target` is reachable from `from` over supertype edges
    fn inherits_from(&self, from: TypeToken, target: TypeToken) -> bool {
        if from == target || self.is_object(target) {
            return true;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(element) = self.get(&current) else {
                continue;
            };
            for supertype in element.direct_supertypes() {
                if supertype == target {
                    return true;
                }
                queue.push_back(supertype);
            }
        }

        false
    }
}

impl AnnotationLookup for TypeRegistry {
    fn has_any_annotation(&self, element: TypeToken, annotations: &[AnnotationId]) -> bool {
        self.get(&element).is_some_and(|element| {
            annotations
                .iter()
                .any(|annotation| element.has_annotation(annotation))
        })
    }

    fn is_annotated_with(&self, annotation: &AnnotationId, meta: &AnnotationId) -> bool {
        self.get_by_fullname(annotation.qualified_name())
            .is_some_and(|element| element.has_annotation(meta))
    }
}

impl TypeHierarchy for TypeRegistry {
    fn is_subtype(&self, sub: &TypeMirror, sup: &TypeMirror) -> bool {
        match (sub, sup) {
            (TypeMirror::Error, _) | (_, TypeMirror::Error) => false,
            (
                TypeMirror::Declared {
                    element: sub_element,
                    arguments: sub_arguments,
                },
                TypeMirror::Declared {
                    element: sup_element,
                    arguments: sup_arguments,
                },
            ) => {
                if sup_arguments.is_empty() {
                    self.inherits_from(*sub_element, *sup_element)
                } else {
                    sub_element == sup_element && sub_arguments == sup_arguments
                }
            }
            (
                TypeMirror::Array(_) | TypeMirror::TypeVariable(_),
                TypeMirror::Declared { element, arguments },
            ) => arguments.is_empty() && self.is_object(*element),
            (TypeMirror::Array(sub_component), TypeMirror::Array(sup_component)) => {
                sub_component == sup_component
                    || (sub_component.is_reference()
                        && sup_component.is_reference()
                        && self.is_subtype(sub_component, sup_component))
            }
            _ => sub == sup,
        }
    }

    fn lookup_well_known(&self, ty: WellKnownType) -> Option<TypeMirror> {
        self.types_by_fullname
            .get(ty.qualified_name())
            .map(|entry| TypeMirror::declared(*entry.value()))
    }

    fn qualified_name(&self, element: TypeToken) -> Option<String> {
        self.get(&element).map(|element| element.qualified_name())
    }

    fn render(&self, ty: &TypeMirror) -> String {
        match ty {
            TypeMirror::Declared { element, arguments } => {
                let mut rendered = self
                    .get(element)
                    .map_or_else(|| element.to_string(), |element| element.name.clone());
                if !arguments.is_empty() {
                    let arguments: Vec<String> =
                        arguments.iter().map(|argument| self.render(argument)).collect();
                    rendered.push('<');
                    rendered.push_str(&arguments.join(", "));
                    rendered.push('>');
                }
                rendered
            }
            TypeMirror::Array(component) => format!("{}[]", self.render(component)),
            TypeMirror::Wildcard {
                extends,
                super_bound,
            } => {
                let mut rendered = String::from("?");
                if let Some(bound) = extends {
                    rendered.push_str(" extends ");
                    rendered.push_str(&self.render(bound));
                }
                if let Some(bound) = super_bound {
                    rendered.push_str(" super ");
                    rendered.push_str(&self.render(bound));
                }
                rendered
            }
            other => other.to_string(),
        }
    }
}

/// Provides a fluent API for declaring and registering type elements
pub struct TypeElementBuilder<'a> {
    registry: &'a TypeRegistry,
    element: TypeElement,
}

impl<'a> TypeElementBuilder<'a> {
    fn new(registry: &'a TypeRegistry, element: TypeElement) -> Self {
        TypeElementBuilder { registry, element }
    }

    /// Set the superclass
    #[must_use]
    pub fn extends(mut self, superclass: TypeToken) -> Self {
        self.element.superclass = Some(superclass);
        self
    }

    /// Set the superclass from a declared type; other type kinds are ignored
    #[must_use]
    pub fn extends_type(mut self, superclass: &TypeMirror) -> Self {
        if let Some(element) = superclass.element() {
            self.element.superclass = Some(element);
        }
        self
    }

    /// Add an implemented (or, for interfaces, extended) interface
    #[must_use]
    pub fn implements(mut self, interface: TypeToken) -> Self {
        self.element.interfaces.push(interface);
        self
    }

    /// Add an annotation
    #[must_use]
    pub fn annotated(mut self, annotation: impl Into<AnnotationMirror>) -> Self {
        self.element.annotations.push(annotation.into());
        self
    }

    /// Replace the modifier set
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.element.modifiers = modifiers;
        self
    }

    /// Register the element with the registry
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeInsert`] if the qualified name is already registered.
    pub fn register(self) -> Result<TypeToken> {
        self.registry.register(self.element)
    }
}
