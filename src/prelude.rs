//! # bindscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the bindscope library. Import this module to get quick access to everything needed
//! to describe declarations and validate them.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bindscope operations
pub use crate::Error;

/// The result type used throughout bindscope
pub use crate::Result;

// ================================================================================================
// Element Model
// ================================================================================================

/// Declarations and their parts
pub use crate::model::{
    MethodElement, MethodElementBuilder, Modifiers, ParameterElement, TypeElement,
    TypeElementKind,
};

/// Type and annotation references
pub use crate::model::{known, AnnotationId, AnnotationMirror, PrimitiveKind, TypeMirror, TypeToken};

// ================================================================================================
// Environment
// ================================================================================================

/// Oracle traits queried by the rules
pub use crate::model::{AnnotationLookup, Environment, TypeHierarchy, WellKnownType};

/// In-memory environment
pub use crate::model::TypeRegistry;

// ================================================================================================
// Validation
// ================================================================================================

/// Validator, configuration and policies
pub use crate::validation::{
    Abstractness, AllowsMultibindings, AllowsScoping, BindingMethodConfig, BindingMethodValidator,
    ExceptionPolicy,
};

/// Extension points and shipped binding kinds
pub use crate::validation::{
    BindingMethodHooks, BindsHooks, DefaultHooks, DependencyRequestValidator, MethodCheck,
    MultibindsHooks, ProvidesHooks, StandardDependencyRequestValidator,
};

/// Reports
pub use crate::validation::{ItemKind, ItemTarget, ReportBuilder, ValidationItem, ValidationReport};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Thread-safe diagnostics collection
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
