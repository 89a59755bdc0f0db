//! Error types for sieve-core

use thiserror::Error;

/// Result type alias for sieve-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while running a filter or a filtering pass.
///
/// These are cached by [`crate::Filtration`] and handed back on every
/// repeated call, so they are cheap to clone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A value could not be coerced to the target primitive type
    #[error("cannot convert {value} to {target}: {reason}")]
    Conversion {
        /// Rendering of the offending value
        value: String,
        /// Target type name
        target: &'static str,
        /// Description of what went wrong
        reason: String,
    },

    /// A filter received a value of the wrong shape
    #[error("filter '{filter}': {message}")]
    InvalidInput {
        /// Name of the filter as it was requested
        filter: String,
        /// Description of the error
        message: String,
    },

    /// A date/time string did not match its layout
    #[error("cannot parse '{input}' as time: {source}")]
    TimeParse {
        /// The input string
        input: String,
        /// Underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// Error returned by a custom rule function
    #[error("{0}")]
    Custom(String),
}

impl FilterError {
    /// Build a conversion error for `value` and `target`.
    pub fn conversion(value: impl ToString, target: &'static str, reason: impl Into<String>) -> Self {
        Self::Conversion {
            value: value.to_string(),
            target,
            reason: reason.into(),
        }
    }

    /// Build an invalid-input error for filter `filter`.
    pub fn invalid_input(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            filter: filter.into(),
            message: message.into(),
        }
    }

    /// Build an error from a custom rule function.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Errors that can occur in sieve-core
#[derive(Error, Debug)]
pub enum Error {
    /// A filter or filtering pass failed
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Malformed rule construction
    #[error("invalid rule: {message}")]
    Construction {
        /// Description of what's invalid
        message: String,
    },

    /// Clean data could not be bound to the target structure
    #[error("bind error: {0}")]
    Bind(#[from] serde_json::Error),

    /// Rule set file could not be found
    #[error("rule set not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse a YAML rule set
    #[error("failed to parse rule set: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }
}
