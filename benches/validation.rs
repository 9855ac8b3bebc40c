//! Benchmarks for binding method validation.
//!
//! Measures:
//! - A clean `@Provides` method (every check runs, nothing reported)
//! - A method violating every structural rule
//! - Parameter-heavy methods, dominated by dependency request validation
//! - Sequential versus parallel batch validation

extern crate bindscope;

use bindscope::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

struct Fixture {
    registry: TypeRegistry,
    module: TypeToken,
    thing: TypeMirror,
    checked: TypeMirror,
}

fn fixture() -> Fixture {
    let registry = TypeRegistry::with_well_known_types().unwrap();
    let module = registry
        .class("app", "AppModule")
        .annotated(known::MODULE)
        .register()
        .unwrap();
    let thing = TypeMirror::declared(registry.class("app", "Thing").register().unwrap());
    let exception = registry.resolve_well_known(WellKnownType::Exception).unwrap();
    let checked = TypeMirror::declared(
        registry
            .class("java.io", "IOException")
            .extends_type(&exception)
            .register()
            .unwrap(),
    );

    Fixture {
        registry,
        module,
        thing,
        checked,
    }
}

fn provides_method(fixture: &Fixture, name: &str, parameters: usize) -> MethodElement {
    let mut builder = MethodElement::builder(name, fixture.module)
        .annotated(known::PROVIDES)
        .returns(fixture.thing.clone());
    for index in 0..parameters {
        builder = builder.parameter(
            ParameterElement::new(format!("p{index}"), fixture.thing.clone())
                .annotated(known::NAMED),
        );
    }
    builder.build()
}

/// Benchmark a method that passes every check.
fn bench_validate_clean(c: &mut Criterion) {
    let fixture = fixture();
    let validator = BindingMethodValidator::provides();
    let method = provides_method(&fixture, "provideThing", 2);

    c.bench_function("validate_clean", |b| {
        b.iter(|| {
            let report = validator
                .validate(black_box(&fixture.registry), black_box(&method))
                .unwrap();
            black_box(report.is_clean())
        });
    });
}

/// Benchmark a method violating every structural rule at once.
fn bench_validate_all_violations(c: &mut Criterion) {
    let fixture = fixture();
    let validator = BindingMethodValidator::provides();
    let helpers = fixture.registry.class("app", "Helpers").register().unwrap();
    let method = MethodElement::builder("provideThing", helpers)
        .annotated(known::PROVIDES)
        .annotated(known::INTO_MAP)
        .type_parameter("T")
        .modifiers(Modifiers::PRIVATE | Modifiers::ABSTRACT)
        .throws(fixture.checked.clone())
        .build();

    c.bench_function("validate_all_violations", |b| {
        b.iter(|| {
            let report = validator
                .validate(black_box(&fixture.registry), black_box(&method))
                .unwrap();
            black_box(report.items().len())
        });
    });
}

/// Benchmark a method with many qualified parameters.
fn bench_validate_many_parameters(c: &mut Criterion) {
    let fixture = fixture();
    let validator = BindingMethodValidator::provides();
    let method = provides_method(&fixture, "provideThing", 32);

    c.bench_function("validate_32_parameters", |b| {
        b.iter(|| {
            let report = validator
                .validate(black_box(&fixture.registry), black_box(&method))
                .unwrap();
            black_box(report)
        });
    });
}

/// Benchmark batch validation, sequential and parallel.
fn bench_validate_batch(c: &mut Criterion) {
    let fixture = fixture();
    let validator = BindingMethodValidator::provides();
    let methods: Vec<MethodElement> = (0..1024)
        .map(|i| provides_method(&fixture, &format!("provide{i}"), i % 4))
        .collect();

    c.bench_function("validate_batch_sequential_1024", |b| {
        b.iter(|| {
            let reports: Vec<_> = methods
                .iter()
                .map(|method| validator.validate(&fixture.registry, method).unwrap())
                .collect();
            black_box(reports)
        });
    });

    c.bench_function("validate_batch_parallel_1024", |b| {
        b.iter(|| {
            let reports = validator
                .validate_all(black_box(&fixture.registry), black_box(&methods))
                .unwrap();
            black_box(reports)
        });
    });
}

criterion_group!(
    benches,
    bench_validate_clean,
    bench_validate_all_violations,
    bench_validate_many_parameters,
    bench_validate_batch
);
criterion_main!(benches);
