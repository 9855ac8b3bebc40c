//! Rules for the `throws` clause of binding methods.
//!
//! [`ExceptionPolicy`] encodes what a kind of binding method may declare as thrown:
//!
//! - [`ExceptionPolicy::NoExceptions`]: nothing at all, not even `Error`
//! - [`ExceptionPolicy::Exception`]: subtypes of `Exception`, plus `Error` and its subtypes
//! - [`ExceptionPolicy::RuntimeException`]: subtypes of `RuntimeException`, plus `Error` and
//!   its subtypes
//!
//! The `Error` exemption applies to the two permissive variants only. Errors are never part
//! of a checked-exception contract, but a method that must not throw must not list them
//! either.
//!
//! The permissive variants report at most one error per validated method, for the first
//! offending thrown type.

use crate::{
    model::{TypeHierarchy, WellKnownType},
    validation::{MethodCheck, ReportBuilder},
    Result,
};

/// The supertype all declared thrown types must extend, other than `Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionPolicy {
    /// Methods may not declare any thrown types
    NoExceptions,
    /// Methods may throw checked or unchecked exceptions or errors
    Exception {
        /// Base type of acceptable exceptions
        superclass: WellKnownType,
    },
    /// Methods may throw unchecked exceptions or errors
    RuntimeException {
        /// Base type of acceptable exceptions
        superclass: WellKnownType,
    },
}

impl ExceptionPolicy {
    /// Checked and unchecked exceptions are accepted
    pub const EXCEPTION: ExceptionPolicy = ExceptionPolicy::Exception {
        superclass: WellKnownType::Exception,
    };

    /// Only unchecked exceptions are accepted
    pub const RUNTIME_EXCEPTION: ExceptionPolicy = ExceptionPolicy::RuntimeException {
        superclass: WellKnownType::RuntimeException,
    };

    /// The rule phrase reported when the policy is violated
    #[must_use]
    pub fn error_message(&self) -> &'static str {
        match self {
            ExceptionPolicy::NoExceptions => "may not throw",
            ExceptionPolicy::Exception { .. } => {
                "may only throw unchecked exceptions or exceptions subclassing Exception"
            }
            ExceptionPolicy::RuntimeException { .. } => "may only throw unchecked exceptions",
        }
    }

    /// The exception base type, `None` for [`ExceptionPolicy::NoExceptions`]
    #[must_use]
    pub fn superclass(&self) -> Option<WellKnownType> {
        match self {
            ExceptionPolicy::NoExceptions => None,
            ExceptionPolicy::Exception { superclass }
            | ExceptionPolicy::RuntimeException { superclass } => Some(*superclass),
        }
    }

    /// Adds an error if the subject declares a thrown type the policy does not accept
    ///
    /// # Errors
    /// Returns [`crate::Error::WellKnownTypeMissing`] if the environment cannot resolve the
    /// exception base type or `java.lang.Error`.
    pub fn check_throws(&self, check: &MethodCheck<'_>, builder: &mut ReportBuilder<'_>) -> Result<()> {
        let thrown_types = &builder.subject().thrown_types;

        let Some(superclass) = self.superclass() else {
            if !thrown_types.is_empty() {
                check.report(builder, self.error_message());
            }
            return Ok(());
        };

        let env = check.env();
        let exception_supertype = env.resolve_well_known(superclass)?;
        let error_type = env.resolve_well_known(WellKnownType::Error)?;

        if let Some(offender) = thrown_types.iter().find(|thrown| {
            !env.is_subtype(thrown, &exception_supertype) && !env.is_subtype(thrown, &error_type)
        }) {
            log::trace!("{} is not an accepted thrown type", env.render(offender));
            check.report(builder, self.error_message());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superclasses() {
        assert_eq!(ExceptionPolicy::NoExceptions.superclass(), None);
        assert_eq!(
            ExceptionPolicy::EXCEPTION.superclass(),
            Some(WellKnownType::Exception)
        );
        assert_eq!(
            ExceptionPolicy::RUNTIME_EXCEPTION.superclass(),
            Some(WellKnownType::RuntimeException)
        );
    }

    #[test]
    fn test_messages_are_distinct() {
        let messages = [
            ExceptionPolicy::NoExceptions.error_message(),
            ExceptionPolicy::EXCEPTION.error_message(),
            ExceptionPolicy::RUNTIME_EXCEPTION.error_message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert!(messages[1].starts_with(messages[2]));
    }
}
