//! Error types for pohoda-xml
//!
//! This module defines all error types used throughout the library.
//! Option errors are raised while a record is being built; the remaining
//! variants come from rendering and serialization.

use thiserror::Error;

/// Result type alias using pohoda-xml Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pohoda-xml operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input contains an option the record type does not declare
    #[error("the option \"{option}\" does not exist, defined options are: {}", allowed.join(", "))]
    UnknownOption {
        /// Name of the rejected option
        option: String,
        /// Options declared by the record type
        allowed: Vec<String>,
    },

    /// A required option is absent from the input
    #[error("the required option \"{option}\" is missing")]
    MissingRequiredOption {
        /// Name of the missing option
        option: String,
    },

    /// The value given for a slot has the wrong type
    #[error("the option \"{option}\" expects a value of type {expected}, got {found}")]
    InvalidValueType {
        /// Name of the option
        option: String,
        /// Kind the slot accepts
        expected: String,
        /// Kind of the value that was given
        found: String,
    },

    /// The value has the right type but is not acceptable
    #[error("the option \"{option}\" has an invalid value: {message}")]
    InvalidValue {
        /// Name of the option
        option: String,
        /// Why the value was rejected
        message: String,
    },

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON input error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidValueType`]
    pub fn invalid_type(
        option: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Error::InvalidValueType {
            option: option.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Shorthand for an [`Error::InvalidValue`]
    pub fn invalid_value(option: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidValue {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::MissingRequiredOption`]
    pub fn missing(option: impl Into<String>) -> Self {
        Error::MissingRequiredOption {
            option: option.into(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_option_display() {
        let err = Error::UnknownOption {
            option: "colour".to_string(),
            allowed: vec!["code".to_string(), "name".to_string()],
        };

        let msg = format!("{}", err);
        assert!(msg.contains("\"colour\""));
        assert!(msg.contains("code, name"));
    }

    #[test]
    fn test_invalid_type_display() {
        let err = Error::invalid_type("price", "float", "text");
        assert_eq!(
            err.to_string(),
            "the option \"price\" expects a value of type float, got text"
        );
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
