//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace, and the
//! `SchemaError` kinds that abort a generation run.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The API document contains something the pipeline cannot classify.
    #[display("Schema Error: {_0}")]
    Schema(SchemaError),

    /// A template resource could not be read or compiled.
    #[from(ignore)]
    #[display("Resource Error: {_0}")]
    Resource(String),

    /// A template failed while rendering a descriptor.
    #[from(ignore)]
    #[display("Render Error: {_0}")]
    Render(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Defects in the API document that abort the whole run.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A parameter's `in` is not one of path/query/header/formData/body.
    #[display("parameter '{name}' has unrecognized location '{location}'")]
    UnrecognizedLocation {
        /// Parameter name.
        name: String,
        /// The raw `in` value.
        location: String,
    },

    /// A `body` parameter was declared in a path item's shared parameter list.
    #[display("body parameter '{name}' is declared at path level on '{path}'")]
    BodyAtPathLevel {
        /// Parameter name.
        name: String,
        /// Path template owning the parameter.
        path: String,
    },

    /// A security scheme's `type` is not basic/apiKey/oauth2.
    #[display("security scheme '{name}' has unrecognized type '{kind}'")]
    UnrecognizedSecurityType {
        /// Scheme identifier in `securityDefinitions`.
        name: String,
        /// The raw `type` value.
        kind: String,
    },

    /// An apiKey scheme lacks a usable `name` or `in`.
    #[display("apiKey security scheme '{name}' is invalid: {reason}")]
    InvalidApiKey {
        /// Scheme identifier in `securityDefinitions`.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A security requirement names a scheme missing from `securityDefinitions`.
    #[display("security requirement references undefined scheme '{name}'")]
    UndefinedSecurityScheme {
        /// The referenced identifier.
        name: String,
    },

    /// A `$ref` does not point at anything in the document.
    #[display("unresolved reference '{reference}'")]
    UnresolvedReference {
        /// The raw `$ref` value.
        reference: String,
    },
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // Strings land in General, never in Resource/Render
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_schema_error_display() {
        let app_err: AppError = SchemaError::UnrecognizedLocation {
            name: "session".into(),
            location: "cookie".into(),
        }
        .into();
        assert_eq!(
            format!("{}", app_err),
            "Schema Error: parameter 'session' has unrecognized location 'cookie'"
        );
    }

    #[test]
    fn test_resource_manual_creation() {
        let app_err = AppError::Resource("outer.hbs missing".into());
        assert_eq!(format!("{}", app_err), "Resource Error: outer.hbs missing");
    }
}
