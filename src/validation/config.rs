//! Configuration of binding method validators.
//!
//! A [`BindingMethodConfig`] describes one kind of binding method: the annotation marking it,
//! where it may be declared, whether it needs a body, what it may throw, and which of the
//! multibinding and scoping annotations it accepts. A configuration is built once and shared
//! by every validation of that kind, possibly from many threads.
//!
//! # Presets
//!
//! - [`BindingMethodConfig::provides`] - concrete `@Provides` methods
//! - [`BindingMethodConfig::binds`] - abstract `@Binds` delegations
//! - [`BindingMethodConfig::multibinds`] - abstract `@Multibinds` declarations
//!
//! # Custom Configurations
//!
//! ```rust
//! use bindscope::model::{known, AnnotationId};
//! use bindscope::validation::{Abstractness, BindingMethodConfig, ExceptionPolicy};
//!
//! let config = BindingMethodConfig::builder(AnnotationId::new("app.Declares"))
//!     .enclosed_by(known::MODULE)
//!     .abstractness(Abstractness::MustBeAbstract)
//!     .exception_policy(ExceptionPolicy::NoExceptions)
//!     .build()?;
//!
//! assert_eq!(config.enclosing_annotations().len(), 1);
//! # Ok::<(), bindscope::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use strum::Display;

use crate::{
    model::{known, AnnotationId},
    validation::{
        Abstractness, DependencyRequestValidator, ExceptionPolicy,
        StandardDependencyRequestValidator,
    },
    Result,
};

/// Whether a binding method may contribute to a multibound collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AllowsMultibindings {
    /// `@IntoSet`, `@ElementsIntoSet` and `@IntoMap` are accepted, at most one of them
    Allowed,
    /// None of the multibinding annotations may be present
    Forbidden,
}

/// Whether a binding method may carry a scope annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AllowsScoping {
    /// At most one scope is accepted
    Allowed,
    /// No scope may be present
    Forbidden,
}

/// Immutable description of one kind of binding method
#[derive(Clone)]
pub struct BindingMethodConfig {
    method_annotation: AnnotationId,
    enclosing_annotations: Vec<AnnotationId>,
    abstractness: Abstractness,
    exception_policy: ExceptionPolicy,
    allows_multibindings: AllowsMultibindings,
    allows_scoping: AllowsScoping,
    dependency_requests: Arc<dyn DependencyRequestValidator>,
}

impl BindingMethodConfig {
    /// Start configuring the binding methods marked with `method_annotation`
    #[must_use]
    pub fn builder(method_annotation: AnnotationId) -> BindingMethodConfigBuilder {
        BindingMethodConfigBuilder::new(method_annotation)
    }

    /// Configuration for `@Provides` methods.
    ///
    /// Concrete, declared in a `@Module` or `@ProducerModule`, may throw unchecked
    /// exceptions, may be scoped and may contribute to multibindings.
    #[must_use]
    pub fn provides() -> Self {
        Self::module_method(
            known::PROVIDES,
            Abstractness::MustBeConcrete,
            ExceptionPolicy::RUNTIME_EXCEPTION,
            AllowsMultibindings::Allowed,
            AllowsScoping::Allowed,
        )
    }

    /// Configuration for `@Binds` methods.
    ///
    /// Abstract, declared in a `@Module` or `@ProducerModule`, may not throw, may be scoped
    /// and may contribute to multibindings.
    #[must_use]
    pub fn binds() -> Self {
        Self::module_method(
            known::BINDS,
            Abstractness::MustBeAbstract,
            ExceptionPolicy::NoExceptions,
            AllowsMultibindings::Allowed,
            AllowsScoping::Allowed,
        )
    }

    /// Configuration for `@Multibinds` methods.
    ///
    /// Abstract, declared in a `@Module` or `@ProducerModule`, may not throw, and accept
    /// neither scopes nor multibinding annotations.
    #[must_use]
    pub fn multibinds() -> Self {
        Self::module_method(
            known::MULTIBINDS,
            Abstractness::MustBeAbstract,
            ExceptionPolicy::NoExceptions,
            AllowsMultibindings::Forbidden,
            AllowsScoping::Forbidden,
        )
    }

    fn module_method(
        method_annotation: AnnotationId,
        abstractness: Abstractness,
        exception_policy: ExceptionPolicy,
        allows_multibindings: AllowsMultibindings,
        allows_scoping: AllowsScoping,
    ) -> Self {
        BindingMethodConfig {
            method_annotation,
            enclosing_annotations: vec![known::MODULE, known::PRODUCER_MODULE],
            abstractness,
            exception_policy,
            allows_multibindings,
            allows_scoping,
            dependency_requests: Arc::new(StandardDependencyRequestValidator),
        }
    }

    /// The annotation marking this kind of binding method
    #[must_use]
    pub fn method_annotation(&self) -> &AnnotationId {
        &self.method_annotation
    }

    /// Annotations of which the enclosing type must carry at least one
    #[must_use]
    pub fn enclosing_annotations(&self) -> &[AnnotationId] {
        &self.enclosing_annotations
    }

    /// Abstract/concrete requirement
    #[must_use]
    pub fn abstractness(&self) -> Abstractness {
        self.abstractness
    }

    /// Thrown-type requirement
    #[must_use]
    pub fn exception_policy(&self) -> ExceptionPolicy {
        self.exception_policy
    }

    /// Multibinding annotation policy
    #[must_use]
    pub fn allows_multibindings(&self) -> AllowsMultibindings {
        self.allows_multibindings
    }

    /// Scope annotation policy
    #[must_use]
    pub fn allows_scoping(&self) -> AllowsScoping {
        self.allows_scoping
    }

    /// The collaborator validating each parameter as a dependency request
    #[must_use]
    pub fn dependency_requests(&self) -> &dyn DependencyRequestValidator {
        self.dependency_requests.as_ref()
    }
}

impl fmt::Debug for BindingMethodConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingMethodConfig")
            .field("method_annotation", &self.method_annotation)
            .field("enclosing_annotations", &self.enclosing_annotations)
            .field("abstractness", &self.abstractness)
            .field("exception_policy", &self.exception_policy)
            .field("allows_multibindings", &self.allows_multibindings)
            .field("allows_scoping", &self.allows_scoping)
            .finish_non_exhaustive()
    }
}

/// Provides a fluent API for building a [`BindingMethodConfig`]
pub struct BindingMethodConfigBuilder {
    method_annotation: AnnotationId,
    enclosing_annotations: Vec<AnnotationId>,
    abstractness: Abstractness,
    exception_policy: ExceptionPolicy,
    allows_multibindings: AllowsMultibindings,
    allows_scoping: AllowsScoping,
    dependency_requests: Option<Arc<dyn DependencyRequestValidator>>,
}

impl BindingMethodConfigBuilder {
    /// Create a new builder
    ///
    /// Defaults: concrete methods, unchecked exceptions only, multibindings and scoping
    /// allowed, the [`StandardDependencyRequestValidator`] for parameters.
    ///
    /// ## Arguments
    /// * 'method_annotation' - The annotation marking the binding methods to validate
    #[must_use]
    pub fn new(method_annotation: AnnotationId) -> Self {
        BindingMethodConfigBuilder {
            method_annotation,
            enclosing_annotations: Vec::new(),
            abstractness: Abstractness::MustBeConcrete,
            exception_policy: ExceptionPolicy::RUNTIME_EXCEPTION,
            allows_multibindings: AllowsMultibindings::Allowed,
            allows_scoping: AllowsScoping::Allowed,
            dependency_requests: None,
        }
    }

    /// Accept enclosing types annotated with `annotation`. Repeated annotations are ignored.
    #[must_use]
    pub fn enclosed_by(mut self, annotation: AnnotationId) -> Self {
        if !self.enclosing_annotations.contains(&annotation) {
            self.enclosing_annotations.push(annotation);
        }
        self
    }

    /// Set the abstract/concrete requirement
    #[must_use]
    pub fn abstractness(mut self, abstractness: Abstractness) -> Self {
        self.abstractness = abstractness;
        self
    }

    /// Set the thrown-type requirement
    #[must_use]
    pub fn exception_policy(mut self, exception_policy: ExceptionPolicy) -> Self {
        self.exception_policy = exception_policy;
        self
    }

    /// Set the multibinding annotation policy
    #[must_use]
    pub fn allows_multibindings(mut self, allows_multibindings: AllowsMultibindings) -> Self {
        self.allows_multibindings = allows_multibindings;
        self
    }

    /// Set the scope annotation policy
    #[must_use]
    pub fn allows_scoping(mut self, allows_scoping: AllowsScoping) -> Self {
        self.allows_scoping = allows_scoping;
        self
    }

    /// Replace the parameter validator
    #[must_use]
    pub fn dependency_requests(mut self, validator: Arc<dyn DependencyRequestValidator>) -> Self {
        self.dependency_requests = Some(validator);
        self
    }

    /// Finish the configuration
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfiguration`] if no enclosing annotation was given.
    pub fn build(self) -> Result<BindingMethodConfig> {
        if self.enclosing_annotations.is_empty() {
            return Err(config_error!(
                "{} methods need at least one enclosing annotation",
                self.method_annotation
            ));
        }

        Ok(BindingMethodConfig {
            method_annotation: self.method_annotation,
            enclosing_annotations: self.enclosing_annotations,
            abstractness: self.abstractness,
            exception_policy: self.exception_policy,
            allows_multibindings: self.allows_multibindings,
            allows_scoping: self.allows_scoping,
            dependency_requests: self
                .dependency_requests
                .unwrap_or_else(|| Arc::new(StandardDependencyRequestValidator)),
        })
    }
}
