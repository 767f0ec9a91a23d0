//! Structured error types for configuration loading.

use crate::config::Format;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Loader errors
    FileReadError,
    DecodeError,

    // Override engine errors
    EnvParseError,
    UnsupportedFieldTypeError,
}

/// Failure while loading a file or applying environment overrides.
///
/// Every variant is terminal: the load stops at the first error and the
/// error is handed back to the caller unchanged.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file path was given but the file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file content does not parse as the format implied by its extension.
    #[error("failed to decode {format} config {}: {message}", .path.display())]
    Decode {
        path: PathBuf,
        format: Format,
        message: String,
    },

    /// An environment value could not be coerced to the field's numeric type.
    #[error("invalid value in {var} for field `{field}`: {message}")]
    EnvParse {
        var: String,
        field: String,
        message: String,
    },

    /// An environment-bound field has a type the override engine cannot set.
    #[error("unexpected field type `{type_name}` for field `{field}` bound to {var}")]
    UnsupportedFieldType {
        var: String,
        field: String,
        type_name: &'static str,
    },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::FileRead { .. } => ErrorCode::FileReadError,
            ConfigError::Decode { .. } => ErrorCode::DecodeError,
            ConfigError::EnvParse { .. } => ErrorCode::EnvParseError,
            ConfigError::UnsupportedFieldType { .. } => ErrorCode::UnsupportedFieldTypeError,
        }
    }

    /// Name of the environment variable involved, for override errors.
    pub fn env_var(&self) -> Option<&str> {
        match self {
            ConfigError::EnvParse { var, .. } | ConfigError::UnsupportedFieldType { var, .. } => {
                Some(var)
            }
            _ => None,
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_serialize_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::UnsupportedFieldTypeError).unwrap();
        assert_eq!(json, "\"UNSUPPORTED_FIELD_TYPE_ERROR\"");
    }

    #[test]
    fn test_file_read_error_display_includes_path() {
        let err = ConfigError::FileRead {
            path: PathBuf::from("missing.yaml"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.code(), ErrorCode::FileReadError);
        assert!(err.to_string().contains("missing.yaml"));
        assert!(err.env_var().is_none());
    }

    #[test]
    fn test_unsupported_field_message() {
        let err = ConfigError::UnsupportedFieldType {
            var: "TAGS".into(),
            field: "server.tags".into(),
            type_name: "alloc::vec::Vec<alloc::string::String>",
        };
        assert!(err.to_string().starts_with("unexpected field type"));
        assert_eq!(err.env_var(), Some("TAGS"));
    }
}
