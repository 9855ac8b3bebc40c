//! Abstract/concrete restriction on binding methods.

use strum::{Display, EnumIter};

use crate::validation::{MethodCheck, ReportBuilder};

/// Whether a kind of binding method needs a body
///
/// There is no "either" state, every binding kind has to pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Abstractness {
    /// The method must be declared abstract
    MustBeAbstract,
    /// The method must have a body
    MustBeConcrete,
}

impl Abstractness {
    /// The rule phrase reported when the requirement is violated
    #[must_use]
    pub fn rule(self) -> &'static str {
        match self {
            Abstractness::MustBeAbstract => "must be abstract",
            Abstractness::MustBeConcrete => "cannot be abstract",
        }
    }

    /// Returns true if a method with the given abstract flag satisfies the requirement
    #[must_use]
    pub fn is_satisfied_by(self, is_abstract: bool) -> bool {
        match self {
            Abstractness::MustBeAbstract => is_abstract,
            Abstractness::MustBeConcrete => !is_abstract,
        }
    }

    /// Adds an error if the subject's abstract modifier contradicts the requirement
    pub fn check(self, check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) {
        let is_abstract = builder.subject().modifiers.is_abstract();
        if !self.is_satisfied_by(is_abstract) {
            check.report(builder, self.rule());
        }
    }
}
