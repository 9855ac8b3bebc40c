//! Structural validation of binding method declarations.
//!
//! This module decides whether a method declaration is well-formed enough to take part in
//! dependency graph construction. It never fails on a malformed declaration; every defect
//! becomes an item of the returned [`ValidationReport`].
//!
//! # Architecture
//!
//! ```text
//! BindingMethodValidator<H>
//!  ├── BindingMethodConfig      what kind of binding method is enforced
//!  │    ├── Abstractness
//!  │    ├── ExceptionPolicy
//!  │    ├── AllowsMultibindings / AllowsScoping
//!  │    └── DependencyRequestValidator   per-parameter rules
//!  └── H: BindingMethodHooks    kind-specific return type and parameter rules
//! ```
//!
//! # Key Components
//!
//! - [`BindingMethodValidator`] - Runs the ordered checks and returns a report
//! - [`BindingMethodConfig`] - Immutable, shareable description of one binding kind
//! - [`ExceptionPolicy`] / [`Abstractness`] - Per-kind policies
//! - [`ReportBuilder`] / [`ValidationReport`] - Findings of one validation call
//! - [`DependencyRequestValidator`] - Collaborator validating each parameter
//! - [`ProvidesHooks`], [`BindsHooks`], [`MultibindsHooks`] - The shipped binding kinds
//!
//! # Usage Examples
//!
//! ```rust
//! use bindscope::model::{known, MethodElement, Modifiers, TypeMirror, TypeRegistry};
//! use bindscope::validation::BindingMethodValidator;
//!
//! let registry = TypeRegistry::with_well_known_types()?;
//! let module = registry.class("app", "AppModule").annotated(known::MODULE).register()?;
//! let service = registry.interface("app", "Service").register()?;
//! let implementation = registry.class("app", "ServiceImpl").implements(service).register()?;
//!
//! let method = MethodElement::builder("bindService", module)
//!     .annotated(known::BINDS)
//!     .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
//!     .parameter(bindscope::model::ParameterElement::new(
//!         "implementation",
//!         TypeMirror::declared(implementation),
//!     ))
//!     .returns(TypeMirror::declared(service))
//!     .build();
//!
//! let report = BindingMethodValidator::binds().validate(&registry, &method)?;
//! assert!(report.is_clean());
//! # Ok::<(), bindscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! Validators and configurations are [`Send`] + [`Sync`] and hold no per-call state.
//! [`BindingMethodValidator::validate_all`] validates a batch in parallel with `rayon`.

mod abstractness;
mod config;
mod dependency;
pub mod element;
mod exceptions;
pub mod kinds;
mod method;
mod report;

pub use abstractness::Abstractness;
pub use config::{
    AllowsMultibindings, AllowsScoping, BindingMethodConfig, BindingMethodConfigBuilder,
};
pub use dependency::{
    check_not_producer, DependencyRequestValidator, StandardDependencyRequestValidator,
};
pub use element::ContributionType;
pub use exceptions::ExceptionPolicy;
pub use kinds::{BindsHooks, MultibindsHooks, ProvidesHooks};
pub use method::{BindingMethodHooks, BindingMethodValidator, DefaultHooks, MethodCheck};
pub use report::{ItemKind, ItemTarget, ReportBuilder, ValidationItem, ValidationReport};
