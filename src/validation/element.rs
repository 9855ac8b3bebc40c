//! Checks shared by every binding element.
//!
//! These run first on every binding method, before the method-specific checks. Each inspects
//! one aspect of the declaration and is independent of the others:
//!
//! - [`check_return_type`] - the bound type, interpreted through the [`ContributionType`]
//! - [`check_qualifiers`] - at most one qualifier
//! - [`check_map_keys`] - map contributions carry exactly one map key, others none
//! - [`check_multibindings`] - multibinding annotations as permitted by the configuration
//! - [`check_scopes`] - scope annotations as permitted by the configuration
//!
//! Annotations that break a rule are reported one by one, each error targeted at the
//! offending annotation.

use strum::Display;

use crate::{
    model::{
        known, AnnotationLookup, AnnotationMirror, MethodElement, TypeHierarchy, TypeMirror,
        WellKnownType,
    },
    validation::{AllowsMultibindings, AllowsScoping, ItemTarget, MethodCheck, ReportBuilder},
};

/// How a binding contributes to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ContributionType {
    /// The binding is the only binding for its key
    Unique,
    /// The returned value is one element of a multibound set (`@IntoSet`)
    Set,
    /// All elements of the returned set join a multibound set (`@ElementsIntoSet`)
    SetValues,
    /// The returned value is one entry of a multibound map (`@IntoMap`)
    Map,
}

impl ContributionType {
    /// Derives the contribution type from the multibinding annotation on `method`.
    ///
    /// With several multibinding annotations present the first one in `IntoSet`,
    /// `ElementsIntoSet`, `IntoMap` order wins; [`check_multibindings`] reports the conflict.
    #[must_use]
    pub fn from_method(method: &MethodElement) -> Self {
        if method.has_annotation(&known::INTO_SET) {
            ContributionType::Set
        } else if method.has_annotation(&known::ELEMENTS_INTO_SET) {
            ContributionType::SetValues
        } else if method.has_annotation(&known::INTO_MAP) {
            ContributionType::Map
        } else {
            ContributionType::Unique
        }
    }

    /// Returns true for every contribution to a multibound collection
    #[must_use]
    pub fn is_multibinding(self) -> bool {
        self != ContributionType::Unique
    }
}

/// Adds errors if the return type cannot be bound
pub fn check_return_type(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
    let return_type = &builder.subject().return_type;
    match ContributionType::from_method(builder.subject()) {
        ContributionType::Unique | ContributionType::Set | ContributionType::Map => {
            check_key_type(check, builder, return_type);
        }
        ContributionType::SetValues => check_set_values_type(check, builder, return_type),
    }
}

fn check_key_type(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>, key_type: &TypeMirror) {
    let env = check.env();
    if key_type.is_void() {
        check.report(builder, "must return a value (not void)");
    } else if WellKnownType::FRAMEWORK_TYPES
        .iter()
        .any(|framework| env.is_well_known(key_type, *framework))
    {
        check.report(builder, "must not return framework types");
    } else if !(key_type.is_primitive() || key_type.is_reference()) {
        check.report(
            builder,
            "must return a primitive, an array, a type variable, or a declared type",
        );
    }
}

fn check_set_values_type(
    check: &MethodCheck<'_>,
    builder: &mut ReportBuilder<'_>,
    return_type: &TypeMirror,
) {
    if !check.env().is_well_known(return_type, WellKnownType::Set) {
        check.report(builder, "must return a Set");
        return;
    }

    match return_type.arguments() {
        [] => check.report(builder, "cannot return a raw Set"),
        [element, ..] => check_key_type(check, builder, element),
    }
}

/// Adds an error for each qualifier if more than one is present
pub fn check_qualifiers(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
    let qualifiers = check
        .env()
        .annotations_with_meta(&builder.subject().annotations, &known::QUALIFIER);
    if qualifiers.len() > 1 {
        report_each(check, builder, &qualifiers, "may not use more than one @Qualifier");
    }
}

/// Adds errors if map keys do not match the contribution type.
///
/// Skipped when multibindings are forbidden, [`check_multibindings`] already rejects the
/// declaration then.
pub fn check_map_keys(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
    if check.config().allows_multibindings() == AllowsMultibindings::Forbidden {
        return;
    }

    let subject = builder.subject();
    let map_keys = check
        .env()
        .annotations_with_meta(&subject.annotations, &known::MAP_KEY);

    if ContributionType::from_method(subject) == ContributionType::Map {
        match map_keys.len() {
            0 => check.report(builder, "of type map must declare a map key"),
            1 => {}
            _ => report_each(check, builder, &map_keys, "may not have more than one map key"),
        }
    } else {
        report_each(check, builder, &map_keys, "of non map type cannot declare a map key");
    }
}

/// Adds errors for multibinding annotations the configuration does not accept
pub fn check_multibindings(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
    let multibindings: Vec<&AnnotationMirror> = builder
        .subject()
        .annotations
        .iter()
        .filter(|mirror| known::MULTIBINDING_ANNOTATIONS.contains(&mirror.annotation))
        .collect();

    match check.config().allows_multibindings() {
        AllowsMultibindings::Forbidden => {
            report_each(check, builder, &multibindings, "cannot have multibinding annotations");
        }
        AllowsMultibindings::Allowed if multibindings.len() > 1 => {
            report_each(
                check,
                builder,
                &multibindings,
                "cannot have more than one multibinding annotation",
            );
        }
        AllowsMultibindings::Allowed => {}
    }
}

/// Adds errors for scope annotations the configuration does not accept
pub fn check_scopes(check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
    let scopes = check
        .env()
        .annotations_with_meta(&builder.subject().annotations, &known::SCOPE);

    match check.config().allows_scoping() {
        AllowsScoping::Forbidden => report_each(check, builder, &scopes, "cannot be scoped"),
        AllowsScoping::Allowed if scopes.len() > 1 => {
            report_each(check, builder, &scopes, "cannot use more than one @Scope");
        }
        AllowsScoping::Allowed => {}
    }
}

fn report_each(
    check: &MethodCheck<'_>,
    builder: &mut ReportBuilder<'_>,
    annotations: &[&AnnotationMirror],
    rule: &str,
) {
    for mirror in annotations {
        check.report_at(
            builder,
            rule,
            ItemTarget::Annotation(mirror.annotation.clone()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeToken;

    #[test]
    fn test_contribution_type_from_annotations() {
        let enclosing = TypeToken::new(0x0100_0001);
        let unique = MethodElement::builder("a", enclosing).build();
        let set = MethodElement::builder("b", enclosing).annotated(known::INTO_SET).build();
        let values = MethodElement::builder("c", enclosing)
            .annotated(known::ELEMENTS_INTO_SET)
            .build();
        let map = MethodElement::builder("d", enclosing).annotated(known::INTO_MAP).build();

        assert_eq!(ContributionType::from_method(&unique), ContributionType::Unique);
        assert_eq!(ContributionType::from_method(&set), ContributionType::Set);
        assert_eq!(ContributionType::from_method(&values), ContributionType::SetValues);
        assert_eq!(ContributionType::from_method(&map), ContributionType::Map);
        assert!(!ContributionType::Unique.is_multibinding());
        assert!(ContributionType::Map.is_multibinding());
    }
}
