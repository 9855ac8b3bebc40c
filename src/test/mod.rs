//! Shared fixtures for the unit tests.

use crate::model::{
    known, MethodElement, MethodElementBuilder, Modifiers, TypeHierarchy, TypeMirror,
    TypeRegistry, TypeToken, WellKnownType,
};

/// A seeded registry with one `@Module` class and one plain class to bind
pub struct TestModule {
    pub registry: TypeRegistry,
    pub module: TypeToken,
    thing: TypeToken,
}

impl TestModule {
    pub fn new() -> Self {
        let registry = TypeRegistry::with_well_known_types().unwrap();
        let module = registry
            .class("app", "AppModule")
            .annotated(known::MODULE)
            .register()
            .unwrap();
        let thing = registry.class("app", "Thing").register().unwrap();

        TestModule {
            registry,
            module,
            thing,
        }
    }

    // The plain `app.Thing` type
    pub fn thing(&self) -> TypeMirror {
        TypeMirror::declared(self.thing)
    }

    // A well-known generic type applied to `arguments`
    pub fn parameterized(&self, ty: WellKnownType, arguments: Vec<TypeMirror>) -> TypeMirror {
        let element = self
            .registry
            .resolve_well_known(ty)
            .unwrap()
            .element()
            .unwrap();
        TypeMirror::parameterized(element, arguments)
    }

    // Public concrete `@Provides` method in the module
    pub fn method(&self, name: &str) -> MethodElementBuilder {
        MethodElement::builder(name, self.module).annotated(known::PROVIDES)
    }

    // Public abstract `@Binds` method in the module
    pub fn binds_method(&self, name: &str) -> MethodElementBuilder {
        MethodElement::builder(name, self.module)
            .annotated(known::BINDS)
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
    }

    // Public abstract `@Multibinds` method in the module
    pub fn multibinds_method(&self, name: &str) -> MethodElementBuilder {
        MethodElement::builder(name, self.module)
            .annotated(known::MULTIBINDS)
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
    }
}
