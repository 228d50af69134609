#![deny(missing_docs)]

//! # Environment File Descriptor
//!
//! Lists the environment variables a generated suite reads credentials from,
//! one per declared security scheme whether or not any path uses it.

use crate::oas::resolver::env_var_name;
use indexmap::IndexSet;
use serde::Serialize;

/// Name of the generated environment file.
pub const ENV_FILE_NAME: &str = ".env";

/// Data handed to the env template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvDescriptor {
    /// Normalised variable names, in declaration order, without repeats.
    pub env_vars: Vec<String>,
}

/// Builds the descriptor from security scheme identifiers.
pub fn build_env_descriptor<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> EnvDescriptor {
    let names: IndexSet<String> = identifiers.into_iter().map(env_var_name).collect();
    EnvDescriptor {
        env_vars: names.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_normalised_in_order() {
        let env = build_env_descriptor(["petstore_auth", "ApiKeyAuth", "basicAuth"]);
        assert_eq!(env.env_vars, vec!["PETSTORE_AUTH", "API_KEY_AUTH", "BASIC_AUTH"]);
    }

    #[test]
    fn test_colliding_names_listed_once() {
        let env = build_env_descriptor(["apiKey", "api_key"]);
        assert_eq!(env.env_vars, vec!["API_KEY"]);
    }

    #[test]
    fn test_empty() {
        assert!(build_env_descriptor([]).env_vars.is_empty());
    }
}
