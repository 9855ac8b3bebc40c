//! Diagnostics collection for binding validation.
//!
//! A [`crate::validation::ValidationReport`] belongs to the single validation call that
//! produced it. When many declarations are validated, possibly in parallel, the findings of all
//! reports are usually funnelled into one place before they are shown to a user. This module
//! provides that place.
//!
//! The [`Diagnostics`] container uses `boxcar::Vec` for thread-safe, lock-free append
//! operations, so reports can be printed from parallel validation without synchronization.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Thread-safe container for diagnostic entries
//! - [`Diagnostic`] - Individual diagnostic entry with severity and location
//! - [`DiagnosticSeverity`] - Severity level (Note, Warning, Error)
//! - [`DiagnosticCategory`] - Which part of a declaration the diagnostic is about
//!
//! # Usage Examples
//!
//! ```rust
//! use bindscope::diagnostics::{Diagnostics, DiagnosticCategory};
//! use std::sync::Arc;
//!
//! let diagnostics = Arc::new(Diagnostics::new());
//!
//! diagnostics.error(
//!     DiagnosticCategory::BindingMethod,
//!     "AppModule.provideGreeting()",
//!     "@Provides methods cannot be private",
//! );
//!
//! if diagnostics.has_errors() {
//!     println!("{}", diagnostics.summary());
//! }
//! ```
//!
//! # Thread Safety
//!
//! All types in this module are [`Send`] and [`Sync`]. Multiple threads can safely add
//! diagnostics simultaneously without coordination.

use std::fmt::{self, Write};

use strum::Display;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    #[strum(serialize = "NOTE")]
    Note,

    /// The declaration is accepted, but probably not what was intended.
    #[strum(serialize = "WARN")]
    Warning,

    /// The declaration cannot be used as a binding.
    #[strum(serialize = "ERROR")]
    Error,
}

/// Category indicating which part of a declaration a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DiagnosticCategory {
    /// The binding method itself: its shape, modifiers and annotations.
    BindingMethod,

    /// A parameter of the binding method, validated as a dependency request.
    DependencyRequest,
}

/// A single diagnostic entry with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// The declaration the diagnostic is attached to.
    pub element: String,

    /// Human-readable description of the issue.
    pub message: String,

    /// Optional parameter of the declaration the issue is about.
    pub parameter: Option<String>,

    /// Optional annotation the issue is about.
    pub annotation: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity level of the diagnostic
    /// * `category` - Category of the diagnostic source
    /// * `element` - The declaration the diagnostic is attached to
    /// * `message` - Human-readable description
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            element: element.into(),
            message: message.into(),
            parameter: None,
            annotation: None,
        }
    }

    /// Adds parameter information to the diagnostic.
    #[must_use]
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Adds annotation information to the diagnostic.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}: {}",
            self.severity, self.category, self.element, self.message
        )?;

        if let Some(parameter) = &self.parameter {
            write!(f, " (parameter: {parameter})")?;
        }

        if let Some(annotation) = &self.annotation {
            write!(f, " (annotation: {annotation})")?;
        }

        Ok(())
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append operations.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds a note.
    pub fn note(
        &self,
        category: DiagnosticCategory,
        element: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Note,
            category,
            element,
            message,
        ));
    }

    /// Adds a warning diagnostic.
    pub fn warning(
        &self,
        category: DiagnosticCategory,
        element: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            element,
            message,
        ));
    }

    /// Adds an error diagnostic.
    pub fn error(
        &self,
        category: DiagnosticCategory,
        element: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Error,
            category,
            element,
            message,
        ));
    }

    /// Adds a diagnostic entry directly.
    ///
    /// Use this for diagnostics that need parameter or annotation context.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of diagnostics of the given severity.
    pub fn count_of(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == severity)
            .count()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.count_of(DiagnosticSeverity::Error)
    }

    /// Returns an iterator over all diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Returns diagnostics attached to the given declaration.
    pub fn by_element(&self, element: &str) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.element == element).collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s), {} note(s)",
            self.error_count(),
            self.count_of(DiagnosticSeverity::Warning),
            self.count_of(DiagnosticSeverity::Note)
        );

        for severity in [DiagnosticSeverity::Error, DiagnosticSeverity::Warning] {
            let mut entries = self.iter().filter(|d| d.severity == severity).peekable();
            if entries.peek().is_none() {
                continue;
            }
            let _ = writeln!(output, "\n{severity}:");
            for diag in entries {
                let _ = writeln!(output, "  {diag}");
            }
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
