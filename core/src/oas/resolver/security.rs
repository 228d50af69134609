#![deny(missing_docs)]

//! # Security Resolution
//!
//! Maps the schemes named by an operation's security requirement onto the
//! places a generated test must inject credentials: a query API key, a
//! header API key, or an `Authorization` header.
//!
//! Credential values are never known at generation time; each injection
//! carries the upper-snake-case environment variable the test reads them
//! from.

use crate::error::SchemaError;
use crate::oas::document::{SecurityRequirement, SecurityScheme};
use heck::ToShoutySnakeCase;
use indexmap::IndexMap;
use serde::Serialize;

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
}

/// The recognised kinds of security scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecuritySchemeType {
    /// HTTP Basic credentials.
    Basic,
    /// An API key in the query or a header.
    ApiKey(ApiKeyLocation),
    /// An OAuth2 access token, sent as a bearer token.
    OAuth2,
}

impl SecuritySchemeType {
    /// Classifies the scheme declared as `name`.
    pub fn of(name: &str, scheme: &SecurityScheme) -> Result<Self, SchemaError> {
        match scheme.kind.as_str() {
            "basic" => Ok(SecuritySchemeType::Basic),
            "oauth2" => Ok(SecuritySchemeType::OAuth2),
            "apiKey" => match scheme.location.as_deref() {
                Some("query") => Ok(SecuritySchemeType::ApiKey(ApiKeyLocation::Query)),
                Some("header") => Ok(SecuritySchemeType::ApiKey(ApiKeyLocation::Header)),
                other => Err(SchemaError::InvalidApiKey {
                    name: name.to_string(),
                    reason: format!("unrecognized 'in' value {:?}", other.unwrap_or("")),
                }),
            },
            other => Err(SchemaError::UnrecognizedSecurityType {
                name: name.to_string(),
                kind: other.to_string(),
            }),
        }
    }
}

/// One credential injection point handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthInjection {
    /// Environment variable holding the credential.
    pub name: String,
    /// The API key parameter/header name, or `Basic`/`Bearer`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// All credential injections for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInjections {
    /// API key sent in the query string.
    pub query_api_key: Option<AuthInjection>,
    /// API key sent as a header.
    pub header_api_key: Option<AuthInjection>,
    /// `Authorization` header (Basic or Bearer).
    pub header_security: Option<AuthInjection>,
}

impl SecurityInjections {
    /// True when the operation needs no credentials.
    pub fn is_empty(&self) -> bool {
        self.query_api_key.is_none()
            && self.header_api_key.is_none()
            && self.header_security.is_none()
    }
}

/// Normalises a scheme identifier into an environment variable name.
///
/// e.g. `ApiKeyAuth` -> `API_KEY_AUTH`, `petstore_auth` -> `PETSTORE_AUTH`
pub fn env_var_name(identifier: &str) -> String {
    identifier.to_shouty_snake_case()
}

/// Resolves the first requirement alternative against `definitions`.
///
/// Later alternatives are ignored. When the first alternative names two
/// schemes landing in the same slot, the later one wins.
pub fn resolve_security(
    requirements: &[SecurityRequirement],
    definitions: &IndexMap<String, SecurityScheme>,
) -> Result<SecurityInjections, SchemaError> {
    let mut injections = SecurityInjections::default();
    let Some(first) = requirements.first() else {
        return Ok(injections);
    };
    if requirements.len() > 1 {
        tracing::warn!(
            ignored = requirements.len() - 1,
            "only the first security requirement alternative is used"
        );
    }

    for reference in first.keys() {
        let scheme = definitions
            .get(reference)
            .ok_or_else(|| SchemaError::UndefinedSecurityScheme {
                name: reference.clone(),
            })?;
        let env_name = env_var_name(reference);

        match SecuritySchemeType::of(reference, scheme)? {
            SecuritySchemeType::Basic => {
                injections.header_security = Some(AuthInjection {
                    name: env_name,
                    kind: "Basic".into(),
                });
            }
            SecuritySchemeType::OAuth2 => {
                injections.header_security = Some(AuthInjection {
                    name: env_name,
                    kind: "Bearer".into(),
                });
            }
            SecuritySchemeType::ApiKey(location) => {
                let key_name = scheme.name.clone().ok_or_else(|| SchemaError::InvalidApiKey {
                    name: reference.clone(),
                    reason: "missing 'name'".into(),
                })?;
                let injection = Some(AuthInjection {
                    name: env_name,
                    kind: key_name,
                });
                match location {
                    ApiKeyLocation::Query => injections.query_api_key = injection,
                    ApiKeyLocation::Header => injections.header_api_key = injection,
                }
            }
        }
    }

    Ok(injections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(kind: &str, location: Option<&str>, name: Option<&str>) -> SecurityScheme {
        SecurityScheme {
            kind: kind.into(),
            name: name.map(Into::into),
            location: location.map(Into::into),
            description: None,
            flow: None,
        }
    }

    fn requirement(names: &[&str]) -> SecurityRequirement {
        names.iter().map(|n| (n.to_string(), Vec::new())).collect()
    }

    fn definitions() -> IndexMap<String, SecurityScheme> {
        let mut defs = IndexMap::new();
        defs.insert("basicAuth".into(), scheme("basic", None, None));
        defs.insert("petstore_auth".into(), scheme("oauth2", None, None));
        defs.insert(
            "ApiKeyAuth".into(),
            scheme("apiKey", Some("header"), Some("X-Api-Key")),
        );
        defs.insert(
            "QueryKey".into(),
            scheme("apiKey", Some("query"), Some("api_key")),
        );
        defs
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("ApiKeyAuth"), "API_KEY_AUTH");
        assert_eq!(env_var_name("petstore_auth"), "PETSTORE_AUTH");
        assert_eq!(env_var_name("basicAuth"), "BASIC_AUTH");
    }

    #[test]
    fn test_header_api_key() {
        let out = resolve_security(&[requirement(&["ApiKeyAuth"])], &definitions()).unwrap();
        assert_eq!(
            out.header_api_key,
            Some(AuthInjection {
                name: "API_KEY_AUTH".into(),
                kind: "X-Api-Key".into()
            })
        );
        assert!(out.query_api_key.is_none());
        assert!(out.header_security.is_none());
    }

    #[test]
    fn test_basic_and_query_key_together() {
        let out =
            resolve_security(&[requirement(&["basicAuth", "QueryKey"])], &definitions()).unwrap();
        assert_eq!(out.header_security.as_ref().unwrap().kind, "Basic");
        assert_eq!(out.header_security.as_ref().unwrap().name, "BASIC_AUTH");
        assert_eq!(out.query_api_key.as_ref().unwrap().kind, "api_key");
        assert_eq!(out.query_api_key.as_ref().unwrap().name, "QUERY_KEY");
    }

    #[test]
    fn test_oauth2_is_bearer() {
        let out = resolve_security(&[requirement(&["petstore_auth"])], &definitions()).unwrap();
        assert_eq!(
            out.header_security,
            Some(AuthInjection {
                name: "PETSTORE_AUTH".into(),
                kind: "Bearer".into()
            })
        );
    }

    #[test]
    fn test_only_first_alternative_is_used() {
        let reqs = [requirement(&["basicAuth"]), requirement(&["ApiKeyAuth"])];
        let out = resolve_security(&reqs, &definitions()).unwrap();
        assert!(out.header_security.is_some());
        assert!(out.header_api_key.is_none());
    }

    #[test]
    fn test_no_requirements() {
        let out = resolve_security(&[], &definitions()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_unrecognized_type() {
        let mut defs = definitions();
        defs.insert("oidc".into(), scheme("openIdConnect", None, None));
        let err = resolve_security(&[requirement(&["oidc"])], &defs).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnrecognizedSecurityType {
                name: "oidc".into(),
                kind: "openIdConnect".into()
            }
        );
    }

    #[test]
    fn test_undefined_scheme() {
        let err = resolve_security(&[requirement(&["nope"])], &definitions()).unwrap_err();
        assert!(matches!(err, SchemaError::UndefinedSecurityScheme { .. }));
    }

    #[test]
    fn test_api_key_cookie_rejected() {
        let mut defs = IndexMap::new();
        defs.insert("c".into(), scheme("apiKey", Some("cookie"), Some("sid")));
        let err = resolve_security(&[requirement(&["c"])], &defs).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidApiKey { .. }));
    }
}
