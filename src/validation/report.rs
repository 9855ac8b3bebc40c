//! Validation reports and the builder that accumulates them.
//!
//! A [`ReportBuilder`] is created for exactly one validation call and passed by `&mut` into
//! every check. Checks append [`ValidationItem`]s in the order they run; duplicates are kept.
//! When all checks have run the builder is turned into an immutable [`ValidationReport`] that
//! borrows the subject it describes.
//!
//! # Example
//!
//! ```rust
//! use bindscope::model::{MethodElement, TypeToken};
//! use bindscope::validation::{ItemTarget, ReportBuilder};
//!
//! let method = MethodElement::builder("provideThing", TypeToken::new(0x0100_0001)).build();
//! let mut builder = ReportBuilder::new(&method);
//! builder.add_error("@Provides methods must return a value (not void)");
//! builder.add_warning_at("unused", ItemTarget::Parameter { index: 0 });
//!
//! let report = builder.build();
//! assert!(!report.is_clean());
//! assert_eq!(report.items().len(), 2);
//! ```

use std::fmt;

use crate::{
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    model::{AnnotationId, Environment, MethodElement, TypeHierarchy},
};

/// Severity of a [`ValidationItem`]
pub type ItemKind = DiagnosticSeverity;

/// The part of the subject a [`ValidationItem`] is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemTarget {
    /// The declaration as a whole
    Subject,
    /// One annotation present on the declaration
    Annotation(AnnotationId),
    /// One parameter, by position
    Parameter {
        /// Zero-based parameter position
        index: usize,
    },
    /// One annotation present on a parameter
    ParameterAnnotation {
        /// Zero-based parameter position
        index: usize,
        /// The offending annotation
        annotation: AnnotationId,
    },
}

impl ItemTarget {
    /// Returns the parameter position if the item is about a parameter
    #[must_use]
    pub fn parameter_index(&self) -> Option<usize> {
        match self {
            ItemTarget::Parameter { index } | ItemTarget::ParameterAnnotation { index, .. } => {
                Some(*index)
            }
            ItemTarget::Subject | ItemTarget::Annotation(_) => None,
        }
    }

    /// Returns the annotation if the item is about one
    #[must_use]
    pub fn annotation(&self) -> Option<&AnnotationId> {
        match self {
            ItemTarget::Annotation(annotation)
            | ItemTarget::ParameterAnnotation { annotation, .. } => Some(annotation),
            ItemTarget::Subject | ItemTarget::Parameter { .. } => None,
        }
    }
}

/// A single finding about a validated declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationItem {
    /// Severity
    pub kind: ItemKind,
    /// Human-readable message
    pub message: String,
    /// Where on the subject the finding applies
    pub target: ItemTarget,
}

impl ValidationItem {
    /// Creates an error about the whole subject
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        ValidationItem {
            kind: ItemKind::Error,
            message: message.into(),
            target: ItemTarget::Subject,
        }
    }

    /// Returns true for error items
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == ItemKind::Error
    }
}

impl fmt::Display for ValidationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Accumulates the findings of one validation call
#[derive(Debug)]
pub struct ReportBuilder<'a> {
    subject: &'a MethodElement,
    items: Vec<ValidationItem>,
}

impl<'a> ReportBuilder<'a> {
    /// Start a report about `subject`
    #[must_use]
    pub fn new(subject: &'a MethodElement) -> Self {
        ReportBuilder {
            subject,
            items: Vec::new(),
        }
    }

    /// The declaration being validated
    #[must_use]
    pub fn subject(&self) -> &'a MethodElement {
        self.subject
    }

    /// Add an error about the whole subject
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.add_error_at(message, ItemTarget::Subject);
    }

    /// Add an error about part of the subject
    pub fn add_error_at(&mut self, message: impl Into<String>, target: ItemTarget) {
        self.add_item(ValidationItem {
            kind: ItemKind::Error,
            message: message.into(),
            target,
        });
    }

    /// Add a warning about the whole subject
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.add_warning_at(message, ItemTarget::Subject);
    }

    /// Add a warning about part of the subject
    pub fn add_warning_at(&mut self, message: impl Into<String>, target: ItemTarget) {
        self.add_item(ValidationItem {
            kind: ItemKind::Warning,
            message: message.into(),
            target,
        });
    }

    /// Add a prepared item
    pub fn add_item(&mut self, item: ValidationItem) {
        self.items.push(item);
    }

    /// Number of items recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish the report
    #[must_use]
    pub fn build(self) -> ValidationReport<'a> {
        ValidationReport {
            subject: self.subject,
            items: self.items,
        }
    }
}

/// The findings about one declaration, in the order the checks produced them
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport<'a> {
    subject: &'a MethodElement,
    items: Vec<ValidationItem>,
}

impl<'a> ValidationReport<'a> {
    /// The declaration this report is about
    #[must_use]
    pub fn subject(&self) -> &'a MethodElement {
        self.subject
    }

    /// All findings in check execution order
    #[must_use]
    pub fn items(&self) -> &[ValidationItem] {
        &self.items
    }

    /// Returns true if no error was found. Warnings and notes do not make a report unclean.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.items.iter().any(ValidationItem::is_error)
    }

    /// Iterates over the error items only
    pub fn errors(&self) -> impl Iterator<Item = &ValidationItem> {
        self.items.iter().filter(|item| item.is_error())
    }

    /// Iterates over `(subject, item)` pairs for diagnostic emission
    pub fn entries(&self) -> impl Iterator<Item = (&'a MethodElement, &ValidationItem)> {
        let subject = self.subject;
        self.items.iter().map(move |item| (subject, item))
    }

    /// The messages of all items, in order
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.message.as_str()).collect()
    }

    /// Emit every item into a diagnostics sink.
    ///
    /// The subject is rendered as `Enclosing.method(ParamTypes)` using the simple names known
    /// to `env`.
    pub fn print_to(&self, env: &dyn Environment, diagnostics: &Diagnostics) {
        let element = describe(env, self.subject);

        for item in &self.items {
            let category = if item.target.parameter_index().is_some() {
                DiagnosticCategory::DependencyRequest
            } else {
                DiagnosticCategory::BindingMethod
            };

            let mut diagnostic =
                Diagnostic::new(item.kind, category, element.clone(), item.message.clone());
            if let Some(parameter) = item
                .target
                .parameter_index()
                .and_then(|index| self.subject.parameters.get(index))
            {
                diagnostic = diagnostic.with_parameter(parameter.name.clone());
            }
            if let Some(annotation) = item.target.annotation() {
                diagnostic = diagnostic.with_annotation(annotation.to_string());
            }
            diagnostics.push(diagnostic);
        }
    }
}

fn describe(env: &dyn Environment, subject: &MethodElement) -> String {
    let enclosing = env
        .qualified_name(subject.enclosing)
        .map(|name| match name.rsplit_once('.') {
            Some((_, simple)) => simple.to_string(),
            None => name,
        })
        .unwrap_or_else(|| subject.enclosing.to_string());
    let parameters: Vec<String> = subject
        .parameters
        .iter()
        .map(|parameter| env.render(&parameter.ty))
        .collect();

    format!("{enclosing}.{}({})", subject.name, parameters.join(", "))
}
