//! Program-element model and environment oracles
//!
//! This module describes what the binding rules look at: method declarations, the types they
//! are declared in, the types they mention and the annotations they carry. It also defines the
//! narrow interface through which the rules query the surrounding compilation environment.
//!
//! # Key Components
//!
//! ## Elements
//! - [`MethodElement`] - The subject of a validation run
//! - [`ParameterElement`] - A formal parameter, validated as a dependency request
//! - [`TypeElement`] - A class, interface or annotation type
//! - [`Modifiers`] - Visibility and abstract/concrete state
//!
//! ## Types and Annotations
//! - [`TypeMirror`] - A use of a type
//! - [`TypeToken`] - Identity of a registered type element
//! - [`AnnotationId`] / [`AnnotationMirror`] - Annotation identity and presence
//!
//! ## Environment
//! - [`AnnotationLookup`], [`TypeHierarchy`], [`Environment`] - Oracles consumed by the rules
//! - [`WellKnownType`] - Types resolved by name
//! - [`TypeRegistry`] - In-memory, thread-safe environment implementation

mod annotation;
mod element;
mod oracle;
mod registry;
mod token;
mod types;

pub use annotation::{known, AnnotationId, AnnotationMirror};
pub use element::{
    MethodElement, MethodElementBuilder, Modifiers, ParameterElement, TypeElement,
    TypeElementKind, TypeElementRc,
};
pub use oracle::{AnnotationLookup, Environment, TypeHierarchy, WellKnownType};
pub use registry::{TypeElementBuilder, TypeRegistry};
pub use token::TypeToken;
pub use types::{PrimitiveKind, TypeMirror};
