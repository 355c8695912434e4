//! Error types for building and writing configuration documents.
//!
//! Validation errors are returned by resource builders when a required field
//! is missing or a value falls outside its enumeration. I/O and serialization
//! errors only come from document emission.

use thiserror::Error;

/// Broad classes of errors, used to decide how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller input was rejected by a builder
    Validation,
    /// The output sink could not be created, written or synced
    Io,
    /// The document could not be marshalled to YAML
    Serialization,
}

impl ErrorCategory {
    /// Whether retrying with corrected input can succeed.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation)
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Validation => "Invalid resource definition",
            Self::Io => "Could not write configuration file",
            Self::Serialization => "Could not serialize configuration",
        }
    }
}

/// Errors that can occur while building resources or emitting a document.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was empty
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the empty field
        field: &'static str,
    },

    /// Registry value type outside the supported set
    #[error("value type is not valid: {value:?}")]
    InvalidValueType {
        /// The rejected value type
        value: String,
    },

    /// MSI file hash algorithm outside the supported set
    #[error("hash algorithm is not valid: {value:?}")]
    InvalidHashAlgorithm {
        /// The rejected algorithm name
        value: String,
    },

    /// Registry value data was an empty sequence
    #[error("valueData is empty")]
    EmptyValueData,

    /// More than one value supplied for a single-value registry type
    #[error("{count} values have been passed but type {value_type} is not MultiString")]
    MultipleValues {
        /// The declared value type (empty when none was given)
        value_type: String,
        /// Number of values supplied
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML marshalling error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Shorthand for an [`Error::EmptyField`].
    pub(crate) fn empty(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Io(_) => ErrorCategory::Io,
            Error::Yaml(_) => ErrorCategory::Serialization,
            _ => ErrorCategory::Validation,
        }
    }

    /// Whether this error was raised by a builder rejecting its input.
    pub fn is_validation(&self) -> bool {
        self.category().is_input_error()
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
