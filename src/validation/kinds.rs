//! Hooks for the shipped binding method kinds.
//!
//! Each kind pairs a preset [`BindingMethodConfig`] with a [`BindingMethodHooks`]
//! implementation adding the rules particular to it:
//!
//! | Kind | Hooks | Extra rules |
//! |------|-------|-------------|
//! | `@Provides` | [`ProvidesHooks`] | parameters may not request `Producer` / `Produced` |
//! | `@Binds` | [`BindsHooks`] | exactly one parameter, assignable to the return type |
//! | `@Multibinds` | [`MultibindsHooks`] | no parameters, returns a plain `Map` or `Set` |

use crate::{
    model::{ParameterElement, TypeHierarchy, TypeMirror, WellKnownType},
    validation::{
        check_not_producer, BindingMethodConfig, BindingMethodHooks, BindingMethodValidator,
        ContributionType, MethodCheck, ReportBuilder,
    },
    Result,
};

/// Hooks for `@Provides` methods
#[derive(Debug, Default, Clone, Copy)]
pub struct ProvidesHooks;

impl BindingMethodHooks for ProvidesHooks {
    fn check_parameter(
        &self,
        check: &MethodCheck<'_>,
        builder: &mut ReportBuilder<'_>,
        index: usize,
        parameter: &ParameterElement,
    ) -> Result<()> {
        check.validate_dependency_request(builder, index, parameter)?;
        check_not_producer(check.env(), builder, index, &parameter.ty);
        Ok(())
    }
}

/// Hooks for `@Binds` methods
#[derive(Debug, Default, Clone, Copy)]
pub struct BindsHooks;

impl BindingMethodHooks for BindsHooks {
    fn check_parameters(&self, check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) -> Result<()> {
        let subject = builder.subject();
        for (index, parameter) in subject.parameters.iter().enumerate() {
            self.check_parameter(check, builder, index, parameter)?;
        }

        let [parameter] = subject.parameters.as_slice() else {
            check.report(
                builder,
                "must have exactly one parameter, whose type is assignable to the return type",
            );
            return Ok(());
        };

        let env = check.env();
        let annotation = check.config().method_annotation().simple_name();
        let return_type = &subject.return_type;

        if ContributionType::from_method(subject) == ContributionType::SetValues
            && !env.is_well_known(return_type, WellKnownType::Set)
        {
            builder.add_error(format!(
                "@{annotation} @ElementsIntoSet methods must return a Set and take a Set parameter"
            ));
        }

        if !env.is_assignable(&parameter.ty, return_type) {
            builder.add_error(format!(
                "@{annotation} methods' parameter type must be assignable to the return type"
            ));
        }

        Ok(())
    }
}

/// Hooks for `@Multibinds` methods
#[derive(Debug, Default, Clone, Copy)]
pub struct MultibindsHooks;

impl MultibindsHooks {
    /// `Map<K, V>` whose values are not framework wrappers
    fn is_plain_map(check: &MethodCheck<'_>, ty: &TypeMirror) -> bool {
        let env = check.env();
        if !env.is_well_known(ty, WellKnownType::Map) {
            return false;
        }
        match ty.arguments() {
            [_, value] => ![
                WellKnownType::Provider,
                WellKnownType::Producer,
                WellKnownType::Produced,
            ]
            .into_iter()
            .any(|framework| env.is_well_known(value, framework)),
            _ => false,
        }
    }

    /// `Set<T>` whose elements are not `Produced`
    fn is_plain_set(check: &MethodCheck<'_>, ty: &TypeMirror) -> bool {
        let env = check.env();
        if !env.is_well_known(ty, WellKnownType::Set) {
            return false;
        }
        match ty.arguments() {
            [element] => !env.is_well_known(element, WellKnownType::Produced),
            _ => false,
        }
    }
}

impl BindingMethodHooks for MultibindsHooks {
    fn check_return_type(&self, check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) -> Result<()> {
        let return_type = &builder.subject().return_type;
        if !Self::is_plain_map(check, return_type) && !Self::is_plain_set(check, return_type) {
            check.report(builder, "must return Map<K, V> or Set<T>");
        }
        Ok(())
    }

    fn check_parameters(&self, check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) -> Result<()> {
        if !builder.subject().parameters.is_empty() {
            check.report(builder, "cannot have parameters");
        }
        Ok(())
    }
}

impl BindingMethodValidator<ProvidesHooks> {
    /// Validator for `@Provides` methods
    #[must_use]
    pub fn provides() -> Self {
        Self::with_hooks(BindingMethodConfig::provides(), ProvidesHooks)
    }
}

impl BindingMethodValidator<BindsHooks> {
    /// Validator for `@Binds` methods
    #[must_use]
    pub fn binds() -> Self {
        Self::with_hooks(BindingMethodConfig::binds(), BindsHooks)
    }
}

impl BindingMethodValidator<MultibindsHooks> {
    /// Validator for `@Multibinds` methods
    #[must_use]
    pub fn multibinds() -> Self {
        Self::with_hooks(BindingMethodConfig::multibinds(), MultibindsHooks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{known, Modifiers, ParameterElement, TypeMirror};
    use crate::test::TestModule;

    #[test]
    fn test_provides_rejects_producer_parameter() {
        let module = TestModule::new();
        let producer = module.parameterized(WellKnownType::Producer, vec![module.thing()]);
        let method = module
            .method("provideThing")
            .parameter(ParameterElement::new("producer", producer))
            .returns(module.thing())
            .build();

        let report = BindingMethodValidator::provides()
            .validate(&module.registry, &method)
            .unwrap();
        assert_eq!(
            report.messages(),
            vec!["Producer may only be injected in @Produces methods"]
        );
    }

    #[test]
    fn test_binds_parameter_count() {
        let module = TestModule::new();
        let method = module
            .binds_method("bindThing")
            .returns(module.thing())
            .build();

        let report = BindingMethodValidator::binds()
            .validate(&module.registry, &method)
            .unwrap();
        assert_eq!(
            report.messages(),
            vec!["@Binds methods must have exactly one parameter, whose type is assignable to the return type"]
        );
    }

    #[test]
    fn test_binds_assignability() {
        let module = TestModule::new();
        let thing = module.thing().element().unwrap();
        let special = module
            .registry
            .class("app", "SpecialThing")
            .extends(thing)
            .register()
            .unwrap();
        let unrelated = module.registry.class("app", "Unrelated").register().unwrap();

        let good = module
            .binds_method("bindSpecial")
            .parameter(ParameterElement::new("impl", TypeMirror::declared(special)))
            .returns(module.thing())
            .build();
        let bad = module
            .binds_method("bindUnrelated")
            .parameter(ParameterElement::new("impl", TypeMirror::declared(unrelated)))
            .returns(module.thing())
            .build();

        let validator = BindingMethodValidator::binds();
        assert!(validator.validate(&module.registry, &good).unwrap().is_clean());
        assert_eq!(
            validator.validate(&module.registry, &bad).unwrap().messages(),
            vec!["@Binds methods' parameter type must be assignable to the return type"]
        );
    }

    #[test]
    fn test_binds_elements_into_set_needs_set() {
        let module = TestModule::new();
        let method = module
            .binds_method("bindValues")
            .annotated(known::ELEMENTS_INTO_SET)
            .parameter(ParameterElement::new("thing", module.thing()))
            .returns(module.thing())
            .build();

        let report = BindingMethodValidator::binds()
            .validate(&module.registry, &method)
            .unwrap();
        assert_eq!(
            report.messages(),
            vec![
                "@Binds methods must return a Set",
                "@Binds @ElementsIntoSet methods must return a Set and take a Set parameter",
            ]
        );
    }

    #[test]
    fn test_multibinds_shapes() {
        let module = TestModule::new();
        let string = TypeMirror::declared(module.registry.class("java.lang", "String").register().unwrap());
        let validator = BindingMethodValidator::multibinds();

        let plain_map = module.parameterized(WellKnownType::Map, vec![string.clone(), module.thing()]);
        let provider_map = module.parameterized(
            WellKnownType::Map,
            vec![
                string,
                module.parameterized(WellKnownType::Provider, vec![module.thing()]),
            ],
        );
        let plain_set = module.parameterized(WellKnownType::Set, vec![module.thing()]);
        let raw_set = module.parameterized(WellKnownType::Set, vec![]);

        for (return_type, clean) in [
            (plain_map, true),
            (provider_map, false),
            (plain_set, true),
            (raw_set, false),
            (module.thing(), false),
        ] {
            let method = module
                .multibinds_method("things")
                .returns(return_type)
                .build();
            let report = validator.validate(&module.registry, &method).unwrap();
            assert_eq!(report.is_clean(), clean, "{:?}", report.messages());
            if !clean {
                assert_eq!(
                    report.messages(),
                    vec!["@Multibinds methods must return Map<K, V> or Set<T>"]
                );
            }
        }
    }

    #[test]
    fn test_multibinds_rejects_parameters_and_scopes() {
        let module = TestModule::new();
        let method = module
            .multibinds_method("things")
            .annotated(known::SINGLETON)
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .parameter(ParameterElement::new("seed", module.thing()))
            .returns(module.parameterized(WellKnownType::Set, vec![module.thing()]))
            .build();

        let report = BindingMethodValidator::multibinds()
            .validate(&module.registry, &method)
            .unwrap();
        assert_eq!(
            report.messages(),
            vec![
                "@Multibinds methods cannot be scoped",
                "@Multibinds methods cannot have parameters",
            ]
        );
    }
}
