use thiserror::Error;

use crate::model::{TypeToken, WellKnownType};

macro_rules! config_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidConfiguration {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidConfiguration {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Structural problems with a binding declaration are never reported through this type. They
/// end up as entries of a [`crate::validation::ValidationReport`]. An `Error` means that the
/// surrounding environment or the validator configuration is broken, which no amount of fixing
/// the validated declaration would repair.
///
/// # Error Categories
///
/// ## Environment Errors
/// - [`Error::WellKnownTypeMissing`] - A type the rules depend on cannot be resolved
/// - [`Error::TypeNotFound`] - Requested type element is not registered
/// - [`Error::TypeInsert`] - Failed to register a type element
///
/// ## Configuration Errors
/// - [`Error::InvalidConfiguration`] - A validator configuration is incomplete or contradictory
///
/// # Examples
///
/// ```rust
/// use bindscope::{Error, model::{TypeRegistry, WellKnownType, TypeHierarchy}};
///
/// let registry = TypeRegistry::new();
/// match registry.resolve_well_known(WellKnownType::Exception) {
///     Ok(ty) => println!("resolved {ty}"),
///     Err(Error::WellKnownTypeMissing(missing)) => eprintln!("environment lacks {missing}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A well-known type could not be resolved in the current environment.
    ///
    /// The exception rules compare thrown types against the error and exception base types.
    /// If the environment cannot provide them, the compilation environment itself is broken
    /// and validation cannot proceed.
    #[error("Well-known type {0} cannot be resolved in the current environment")]
    WellKnownTypeMissing(WellKnownType),

    /// Failed to find a type element in the registry.
    ///
    /// The associated [`TypeToken`] identifies which type was not found.
    #[error("Failed to find type in TypeRegistry - {0}")]
    TypeNotFound(TypeToken),

    /// Failed to insert a new type element into the registry.
    ///
    /// Occurs when the qualified name is already taken by another element.
    #[error("Failed to insert new type into TypeRegistry - {0}")]
    TypeInsert(String),

    /// The validator configuration is not usable.
    ///
    /// # Fields
    ///
    /// * `message` - Description of what is wrong with the configuration
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Invalid configuration - {file}:{line}: {message}")]
    InvalidConfiguration {
        /// The message to be printed for the configuration error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_macro_records_location() {
        let err = config_error!("missing {}", "annotation");
        match err {
            Error::InvalidConfiguration {
                message,
                file,
                line,
            } => {
                assert_eq!(message, "missing annotation");
                assert!(file.ends_with("error.rs"));
                assert!(line > 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_well_known_display() {
        let err = Error::WellKnownTypeMissing(WellKnownType::RuntimeException);
        assert_eq!(
            err.to_string(),
            "Well-known type java.lang.RuntimeException cannot be resolved in the current environment"
        );
    }
}
