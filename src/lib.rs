// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # bindscope
//!
//! Structural validation of binding declarations for a dependency-injection compiler front
//! end.
//!
//! A binding declaration is a method whose presence and shape tell the dependency graph how a
//! value is provided: `@Provides` methods compute it, `@Binds` methods delegate to another
//! binding, `@Multibinds` methods declare a possibly empty collection. Before a declaration
//! may take part in graph construction it has to be well-formed. `bindscope` decides whether
//! it is and describes every defect it finds in a structured report.
//!
//! ## Features
//!
//! - **Configurable rule engine**: one validator per binding kind, configured with the marker
//!   annotation, the legal enclosing annotations, abstractness and the exception policy
//! - **Complete reports**: all checks run on every call, a report lists every defect at once
//! - **Extensible**: kind-specific return type and parameter rules through hook traits
//! - **Thread-safe**: validators, configurations and the in-memory environment are shared
//!   freely; batches are validated in parallel
//! - **Environment-agnostic**: the rules query the host compiler through two narrow oracle
//!   traits, an in-memory implementation is included
//!
//! ## Quick Start
//!
//! ```rust
//! use bindscope::prelude::*;
//!
//! let registry = TypeRegistry::with_well_known_types()?;
//! let module = registry.class("app", "AppModule").annotated(known::MODULE).register()?;
//! let greeting = registry.class("app", "Greeting").register()?;
//! let checked = registry.class("app", "CheckedFailure")
//!     .extends_type(&registry.resolve_well_known(WellKnownType::Exception)?)
//!     .register()?;
//!
//! let method = MethodElement::builder("provideGreeting", module)
//!     .annotated(known::PROVIDES)
//!     .throws(TypeMirror::declared(checked))
//!     .returns(TypeMirror::declared(greeting))
//!     .build();
//!
//! let report = BindingMethodValidator::provides().validate(&registry, &method)?;
//! assert_eq!(
//!     report.messages(),
//!     vec!["@Provides methods may only throw unchecked exceptions"]
//! );
//! # Ok::<(), bindscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`model`] - Program elements, types, annotations and the environment oracles
//! - [`validation`] - The rule engine and its reports
//! - [`diagnostics`] - Thread-safe sink collecting the findings of many reports
//!
//! ## Error Handling
//!
//! Defects of a validated declaration are report items, never errors. [`Error`] is returned
//! only when the environment is unusable (a well-known type cannot be resolved) or a
//! configuration is incomplete.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: every validation at `debug`, every failed check
//! at `trace`. Install any `log` compatible logger to see the output.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use bindscope::prelude::*;
///
/// let validator = BindingMethodValidator::binds();
/// assert_eq!(validator.method_annotation(), &known::BINDS);
/// ```
pub mod prelude;

/// Program-element model and the environment the rules query
///
/// # Key Types
///
/// - [`model::MethodElement`] - The declaration being validated
/// - [`model::TypeMirror`] - A use of a type
/// - [`model::Environment`] - Annotation and type hierarchy oracles
/// - [`model::TypeRegistry`] - Thread-safe, in-memory environment
pub mod model;

/// Binding method validation
///
/// See [`validation::BindingMethodValidator`] for the entry point.
pub mod validation;

/// Collection of diagnostics from many validation reports
pub mod diagnostics;

/// `bindscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bindscope` Error type
///
/// # Examples
///
/// ```rust
/// use bindscope::{Error, validation::BindingMethodConfig, model::known};
///
/// match BindingMethodConfig::builder(known::PROVIDES).build() {
///     Ok(_) => println!("configured"),
///     Err(Error::InvalidConfiguration { message, .. }) => println!("Invalid: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Validator for a single kind of binding method.
///
/// See [`validation::BindingMethodValidator`].
pub use validation::BindingMethodValidator;

/// Immutable configuration of a binding method kind.
///
/// See [`validation::BindingMethodConfig`].
pub use validation::BindingMethodConfig;
