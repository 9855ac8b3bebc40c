//! The binding method validator.
//!
//! [`BindingMethodValidator`] runs a fixed sequence of structural checks over one method
//! declaration and collects every violation into a [`ValidationReport`]. The sequence is:
//!
//! 1. the checks shared by every binding element (see [`crate::validation::element`]), the
//!    return type check going through [`BindingMethodHooks::check_return_type`]
//! 2. the enclosing type carries one of the configured annotations
//! 3. no type parameters
//! 4. not private
//! 5. the configured [`crate::validation::Abstractness`]
//! 6. the configured [`crate::validation::ExceptionPolicy`]
//! 7. every parameter, through [`BindingMethodHooks::check_parameters`]
//!
//! All checks run even when earlier ones fail, so a single call surfaces every defect.
//!
//! # Extension Points
//!
//! Binding kinds with extra rules implement [`BindingMethodHooks`] and override only what
//! differs. The hooks for the shipped kinds live in [`crate::validation::kinds`].
//!
//! # Errors
//!
//! A malformed declaration never makes `validate` fail. `Err` is reserved for environment
//! failures, a well-known type the environment cannot resolve.
//!
//! # Examples
//!
//! ```rust
//! use bindscope::model::{known, MethodElement, Modifiers, TypeMirror, TypeRegistry};
//! use bindscope::validation::BindingMethodValidator;
//!
//! let registry = TypeRegistry::with_well_known_types()?;
//! let module = registry.class("app", "AppModule").annotated(known::MODULE).register()?;
//! let greeting = registry.class("app", "Greeting").register()?;
//!
//! let method = MethodElement::builder("provideGreeting", module)
//!     .annotated(known::PROVIDES)
//!     .modifiers(Modifiers::PRIVATE)
//!     .returns(TypeMirror::declared(greeting))
//!     .build();
//!
//! let report = BindingMethodValidator::provides().validate(&registry, &method)?;
//! assert_eq!(report.messages(), vec!["@Provides methods cannot be private"]);
//! # Ok::<(), bindscope::Error>(())
//! ```

use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    model::{AnnotationId, AnnotationLookup, Environment, MethodElement, ParameterElement},
    validation::{element, BindingMethodConfig, ItemTarget, ReportBuilder, ValidationReport},
    Result,
};

/// Everything a check needs besides the report: the environment and the configuration
#[derive(Clone, Copy)]
pub struct MethodCheck<'c> {
    env: &'c dyn Environment,
    config: &'c BindingMethodConfig,
}

impl<'c> MethodCheck<'c> {
    /// Create a check context
    #[must_use]
    pub fn new(env: &'c dyn Environment, config: &'c BindingMethodConfig) -> Self {
        MethodCheck { env, config }
    }

    /// The environment to query
    #[must_use]
    pub fn env(&self) -> &'c dyn Environment {
        self.env
    }

    /// The configuration being enforced
    #[must_use]
    pub fn config(&self) -> &'c BindingMethodConfig {
        self.config
    }

    /// Returns `@<Annotation> methods <rule>`
    #[must_use]
    pub fn binding_methods(&self, rule: &str) -> String {
        format!(
            "@{} methods {rule}",
            self.config.method_annotation().simple_name()
        )
    }

    /// Adds a `@<Annotation> methods <rule>` error about the whole subject
    pub fn report(&self, builder: &mut ReportBuilder<'_>, rule: &str) {
        self.report_at(builder, rule, ItemTarget::Subject);
    }

    /// Adds a `@<Annotation> methods <rule>` error about part of the subject
    pub fn report_at(&self, builder: &mut ReportBuilder<'_>, rule: &str, target: ItemTarget) {
        trace!("{}: {rule} ({target:?})", builder.subject().name);
        builder.add_error_at(self.binding_methods(rule), target);
    }

    /// Hands one parameter to the configured dependency request validator
    ///
    /// # Errors
    /// Propagates environment failures from the dependency request validator.
    pub fn validate_dependency_request(
        &self,
        builder: &mut ReportBuilder<'_>,
        index: usize,
        parameter: &ParameterElement,
    ) -> Result<()> {
        self.config
            .dependency_requests()
            .validate(self.env, builder, index, parameter, &parameter.ty)
    }
}

/// Overridable steps of binding method validation
///
/// Every method has a default; implementors override the steps their binding kind
/// treats differently.
pub trait BindingMethodHooks: Send + Sync {
    /// Checks the return type. Defaults to [`element::check_return_type`].
    ///
    /// # Errors
    /// Returns an error only on environment failure.
    fn check_return_type(&self, check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) -> Result<()> {
        element::check_return_type(check, builder);
        Ok(())
    }

    /// Checks all parameters. Defaults to [`Self::check_parameter`] for each, in order.
    ///
    /// # Errors
    /// Returns an error only on environment failure.
    fn check_parameters(&self, check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) -> Result<()> {
        for (index, parameter) in builder.subject().parameters.iter().enumerate() {
            self.check_parameter(check, builder, index, parameter)?;
        }
        Ok(())
    }

    /// Checks one parameter. Defaults to the configured dependency request validator.
    ///
    /// # Errors
    /// Returns an error only on environment failure.
    fn check_parameter(
        &self,
        check: &MethodCheck<'_>,
        builder: &mut ReportBuilder<'_>,
        index: usize,
        parameter: &ParameterElement,
    ) -> Result<()> {
        check.validate_dependency_request(builder, index, parameter)
    }
}

/// Hooks using every default
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

impl BindingMethodHooks for DefaultHooks {}

/// Validates binding method declarations against one [`BindingMethodConfig`]
///
/// The validator holds no per-call state; one instance can validate any number of methods,
/// from any number of threads.
#[derive(Debug)]
pub struct BindingMethodValidator<H = DefaultHooks> {
    config: BindingMethodConfig,
    hooks: H,
}

impl BindingMethodValidator<DefaultHooks> {
    /// Create a validator running only the default checks
    #[must_use]
    pub fn new(config: BindingMethodConfig) -> Self {
        Self::with_hooks(config, DefaultHooks)
    }
}

impl<H: BindingMethodHooks> BindingMethodValidator<H> {
    /// Create a validator with custom hooks
    ///
    /// ## Arguments
    /// * 'config' - The binding kind to enforce
    /// * 'hooks'  - The extension points for kind-specific rules
    #[must_use]
    pub fn with_hooks(config: BindingMethodConfig, hooks: H) -> Self {
        BindingMethodValidator { config, hooks }
    }

    /// The enforced configuration
    #[must_use]
    pub fn config(&self) -> &BindingMethodConfig {
        &self.config
    }

    /// The annotation marking the methods this validator is responsible for
    #[must_use]
    pub fn method_annotation(&self) -> &AnnotationId {
        self.config.method_annotation()
    }

    /// Validate a single binding method declaration
    ///
    /// ## Arguments
    /// * 'env'     - The environment the declaration lives in
    /// * 'subject' - The declaration to validate
    ///
    /// # Errors
    /// Returns [`crate::Error::WellKnownTypeMissing`] if the environment cannot resolve a type
    /// the rules depend on. Defects of `subject` are never errors, they are report items.
    pub fn validate<'a>(
        &self,
        env: &dyn Environment,
        subject: &'a MethodElement,
    ) -> Result<ValidationReport<'a>> {
        debug!(
            "Validating {} method {subject}",
            self.config.method_annotation()
        );

        let check = MethodCheck::new(env, &self.config);
        let mut builder = ReportBuilder::new(subject);

        self.hooks.check_return_type(&check, &mut builder)?;
        element::check_qualifiers(&check, &mut builder);
        element::check_map_keys(&check, &mut builder);
        element::check_multibindings(&check, &mut builder);
        element::check_scopes(&check, &mut builder);

        Self::check_enclosing_type(&check, &mut builder);
        Self::check_type_parameters(&check, &mut builder);
        Self::check_not_private(&check, &mut builder);
        self.config.abstractness().check(&check, &mut builder);
        self.config
            .exception_policy()
            .check_throws(&check, &mut builder)?;
        self.hooks.check_parameters(&check, &mut builder)?;

        let report = builder.build();
        debug!("{subject}: {} finding(s)", report.items().len());
        Ok(report)
    }

    /// Validate many declarations in parallel
    ///
    /// Reports are returned in the order of `subjects`. The first environment failure
    /// encountered is returned instead.
    ///
    /// # Errors
    /// Returns [`crate::Error::WellKnownTypeMissing`] if the environment cannot resolve a type
    /// the rules depend on.
    pub fn validate_all<'a>(
        &self,
        env: &dyn Environment,
        subjects: &'a [MethodElement],
    ) -> Result<Vec<ValidationReport<'a>>> {
        debug!(
            "Validating {} {} method(s)",
            subjects.len(),
            self.config.method_annotation()
        );

        subjects
            .par_iter()
            .map(|subject| self.validate(env, subject))
            .collect()
    }

    fn check_enclosing_type(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
        let enclosing_annotations = check.config().enclosing_annotations();
        if !check
            .env()
            .has_any_annotation(builder.subject().enclosing, enclosing_annotations)
        {
            let names: Vec<&str> = enclosing_annotations
                .iter()
                .map(AnnotationId::simple_name)
                .collect();
            check.report(
                builder,
                &format!("can only be present within a @{}", names.join(" or @")),
            );
        }
    }

    fn check_type_parameters(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
        if !builder.subject().type_parameters.is_empty() {
            check.report(builder, "may not have type parameters");
        }
    }

    fn check_not_private(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
        if builder.subject().modifiers.is_private() {
            check.report(builder, "cannot be private");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{known, Modifiers, TypeMirror, TypeRegistry};
    use crate::test::TestModule;

    fn concrete_config() -> BindingMethodConfig {
        BindingMethodConfig::builder(known::PROVIDES)
            .enclosed_by(known::MODULE)
            .build()
            .unwrap()
    }

    #[test]
    fn test_binding_methods_prefix() {
        let registry = TypeRegistry::new();
        let config = concrete_config();
        let check = MethodCheck::new(&registry, &config);
        assert_eq!(
            check.binding_methods("cannot be private"),
            "@Provides methods cannot be private"
        );
    }

    #[test]
    fn test_clean_method() {
        let module = TestModule::new();
        let method = module.method("provideThing").returns(module.thing()).build();

        let validator = BindingMethodValidator::new(concrete_config());
        let report = validator.validate(&module.registry, &method).unwrap();
        assert!(report.is_clean(), "{:?}", report.messages());
        assert!(report.items().is_empty());
    }

    #[test]
    fn test_all_checks_run() {
        let module = TestModule::new();
        let plain = module.registry.class("app", "Plain").register().unwrap();
        let method = MethodElement::builder("provideThing", plain)
            .annotated(known::PROVIDES)
            .type_parameter("T")
            .modifiers(Modifiers::PRIVATE | Modifiers::ABSTRACT)
            .build();

        let validator = BindingMethodValidator::new(concrete_config());
        let report = validator.validate(&module.registry, &method).unwrap();
        assert_eq!(
            report.messages(),
            vec![
                "@Provides methods must return a value (not void)",
                "@Provides methods can only be present within a @Module",
                "@Provides methods may not have type parameters",
                "@Provides methods cannot be private",
                "@Provides methods cannot be abstract",
            ]
        );
    }

    #[test]
    fn test_validate_all_preserves_order() {
        let module = TestModule::new();
        let methods: Vec<MethodElement> = (0..32)
            .map(|i| {
                let builder = module.method(&format!("provide{i}")).returns(module.thing());
                if i % 2 == 0 {
                    builder.modifiers(Modifiers::PRIVATE).build()
                } else {
                    builder.build()
                }
            })
            .collect();

        let validator = BindingMethodValidator::new(concrete_config());
        let reports = validator.validate_all(&module.registry, &methods).unwrap();
        assert_eq!(reports.len(), methods.len());
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.subject().name, format!("provide{i}"));
            assert_eq!(report.is_clean(), i % 2 == 1);
        }
    }

    #[test]
    fn test_environment_failure_propagates() {
        let registry = TypeRegistry::new();
        let module = registry
            .class("app", "M")
            .annotated(known::MODULE)
            .register()
            .unwrap();
        let method = MethodElement::builder("provide", module)
            .returns(TypeMirror::Primitive(crate::model::PrimitiveKind::Int))
            .build();

        let validator = BindingMethodValidator::new(concrete_config());
        assert!(matches!(
            validator.validate(&registry, &method),
            Err(crate::Error::WellKnownTypeMissing(_))
        ));
    }
}
