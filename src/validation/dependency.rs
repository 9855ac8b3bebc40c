//! Validation of binding-method parameters as dependency requests.
//!
//! Each parameter of a binding method asks the graph for a value. Whether such a request is
//! well-formed does not depend on the kind of binding method, so the rules live behind the
//! [`DependencyRequestValidator`] trait and are shared by every configuration.
//!
//! [`StandardDependencyRequestValidator`] implements the rules every request obeys:
//!
//! - at most one qualifier per request
//! - framework wrappers (`Provider`, `Lazy`, `Producer`, `Produced`) may not wrap a wildcard
//! - `MembersInjector` must be parameterized

use crate::{
    model::{
        known, AnnotationLookup, Environment, ParameterElement, TypeHierarchy, TypeMirror,
        WellKnownType,
    },
    validation::{ItemTarget, ReportBuilder},
    Result,
};

/// Wrappers whose type argument names the actually requested key
const UNWRAPPED_FRAMEWORK_TYPES: [WellKnownType; 4] = [
    WellKnownType::Provider,
    WellKnownType::Lazy,
    WellKnownType::Producer,
    WellKnownType::Produced,
];

/// Validates one parameter of a binding method as a dependency request
pub trait DependencyRequestValidator: Send + Sync {
    /// Append any findings about the parameter at position `index` to `report`.
    ///
    /// ## Arguments
    /// * 'env'       - The environment to query
    /// * 'report'    - The report of the enclosing method
    /// * 'index'     - Position of the parameter
    /// * 'parameter' - The parameter declaration
    /// * 'ty'        - The requested type, usually the parameter's declared type
    ///
    /// # Errors
    /// Returns an error only if the environment is unusable.
    fn validate(
        &self,
        env: &dyn Environment,
        report: &mut ReportBuilder<'_>,
        index: usize,
        parameter: &ParameterElement,
        ty: &TypeMirror,
    ) -> Result<()>;
}

/// The request rules every binding method parameter obeys
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardDependencyRequestValidator;

impl StandardDependencyRequestValidator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        StandardDependencyRequestValidator
    }

    fn check_qualifiers(
        env: &dyn Environment,
        report: &mut ReportBuilder<'_>,
        index: usize,
        parameter: &ParameterElement,
    ) {
        let qualifiers = env.annotations_with_meta(&parameter.annotations, &known::QUALIFIER);
        if qualifiers.len() > 1 {
            for qualifier in qualifiers {
                report.add_error_at(
                    "A single dependency request may not use more than one @Qualifier",
                    ItemTarget::ParameterAnnotation {
                        index,
                        annotation: qualifier.annotation.clone(),
                    },
                );
            }
        }
    }

    fn check_type(env: &dyn Environment, report: &mut ReportBuilder<'_>, index: usize, ty: &TypeMirror) {
        let key = key_type(env, ty);
        if key.is_wildcard() {
            report.add_error_at(
                format!(
                    "Provider<T>, Lazy<T>, Producer<T>, and Produced<T> may not be requested \
                     when T is a wildcard type such as {}",
                    env.render(key)
                ),
                ItemTarget::Parameter { index },
            );
        }

        if let Some(members_injector) = env.lookup_well_known(WellKnownType::MembersInjector) {
            if members_injector
                .element()
                .is_some_and(|element| ty.is_raw_of(element))
            {
                report.add_error_at(
                    "Cannot inject a raw MembersInjector",
                    ItemTarget::Parameter { index },
                );
            }
        }
    }
}

impl DependencyRequestValidator for StandardDependencyRequestValidator {
    fn validate(
        &self,
        env: &dyn Environment,
        report: &mut ReportBuilder<'_>,
        index: usize,
        parameter: &ParameterElement,
        ty: &TypeMirror,
    ) -> Result<()> {
        Self::check_qualifiers(env, report, index, parameter);
        Self::check_type(env, report, index, ty);
        Ok(())
    }
}

/// Strips framework wrappers off a requested type, `Provider<Lazy<Foo>>` yields `Foo`
fn key_type<'t>(env: &dyn Environment, ty: &'t TypeMirror) -> &'t TypeMirror {
    let mut current = ty;
    while let [argument] = current.arguments() {
        let wrapped = UNWRAPPED_FRAMEWORK_TYPES
            .iter()
            .any(|framework| env.is_well_known(current, *framework));
        if !wrapped {
            break;
        }
        current = argument;
    }
    current
}

/// Adds an error if the parameter requests a `Producer` or `Produced`.
///
/// Asynchronous values can only be consumed by producer methods; every other binding method
/// calls this for each of its parameters.
pub fn check_not_producer(
    env: &dyn Environment,
    report: &mut ReportBuilder<'_>,
    index: usize,
    ty: &TypeMirror,
) {
    for producer_type in [WellKnownType::Producer, WellKnownType::Produced] {
        if env.is_well_known(ty, producer_type) {
            report.add_error_at(
                format!(
                    "{} may only be injected in @Produces methods",
                    producer_type.simple_name()
                ),
                ItemTarget::Parameter { index },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodElement, TypeRegistry, TypeToken};

    fn registry() -> TypeRegistry {
        TypeRegistry::with_well_known_types().unwrap()
    }

    fn validate_parameter(registry: &TypeRegistry, parameter: ParameterElement) -> Vec<String> {
        let method = MethodElement::builder("m", TypeToken::new(0x0100_FFFF))
            .parameter(parameter)
            .build();
        let mut report = ReportBuilder::new(&method);
        let parameter = &method.parameters[0];
        StandardDependencyRequestValidator::new()
            .validate(registry, &mut report, 0, parameter, &parameter.ty)
            .unwrap();
        report.build().messages().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_single_qualifier_is_fine() {
        let registry = registry();
        let foo = registry.class("t", "Foo").register().unwrap();
        let parameter = ParameterElement::new("foo", TypeMirror::declared(foo)).annotated(known::NAMED);
        assert!(validate_parameter(&registry, parameter).is_empty());
    }

    #[test]
    fn test_two_qualifiers_report_each() {
        let registry = registry();
        let foo = registry.class("t", "Foo").register().unwrap();
        let other = crate::model::AnnotationId::new("t.Other");
        registry.annotation_type(&other).annotated(known::QUALIFIER).register().unwrap();

        let parameter = ParameterElement::new("foo", TypeMirror::declared(foo))
            .annotated(known::NAMED)
            .annotated(other)
            .annotated(known::SINGLETON);
        let messages = validate_parameter(&registry, parameter);
        assert_eq!(
            messages,
            vec![
                "A single dependency request may not use more than one @Qualifier";
                2
            ]
        );
    }

    #[test]
    fn test_wildcard_provider() {
        let registry = registry();
        let provider = registry.resolve_well_known(WellKnownType::Provider).unwrap();
        let exception = registry.resolve_well_known(WellKnownType::Exception).unwrap();
        let ty = TypeMirror::parameterized(
            provider.element().unwrap(),
            vec![TypeMirror::wildcard_extends(exception)],
        );

        let messages = validate_parameter(&registry, ParameterElement::new("p", ty));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].ends_with("wildcard type such as ? extends Exception"));
    }

    #[test]
    fn test_nested_wildcard_and_raw_members_injector() {
        let registry = registry();
        let provider = registry.resolve_well_known(WellKnownType::Provider).unwrap();
        let lazy = registry.resolve_well_known(WellKnownType::Lazy).unwrap();
        let injector = registry.resolve_well_known(WellKnownType::MembersInjector).unwrap();

        let nested = TypeMirror::parameterized(
            provider.element().unwrap(),
            vec![TypeMirror::parameterized(
                lazy.element().unwrap(),
                vec![TypeMirror::wildcard()],
            )],
        );
        assert_eq!(validate_parameter(&registry, ParameterElement::new("p", nested)).len(), 1);

        let messages = validate_parameter(&registry, ParameterElement::new("i", injector));
        assert_eq!(messages, vec!["Cannot inject a raw MembersInjector"]);
    }

    #[test]
    fn test_check_not_producer() {
        let registry = registry();
        let module = registry.class("t", "M").register().unwrap();
        let producer = registry.resolve_well_known(WellKnownType::Producer).unwrap();
        let method = MethodElement::builder("m", module).build();

        let mut report = ReportBuilder::new(&method);
        check_not_producer(&registry, &mut report, 3, &producer);
        let report = report.build();

        assert_eq!(
            report.messages(),
            vec!["Producer may only be injected in @Produces methods"]
        );
        assert_eq!(report.items()[0].target, ItemTarget::Parameter { index: 3 });
    }
}
