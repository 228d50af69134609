#![deny(missing_docs)]

//! # Swagger Document Model
//!
//! Typed, read-only view of a Swagger 2.0 document.
//!
//! The maps use `IndexMap` so that paths, operations and response codes are
//! visited in the order they appear in the source text. Path items and the
//! `paths`/`responses` objects have hand-written `Deserialize` impls so that
//! `x-` extensions are skipped and YAML integer status keys (`200:`) are
//! accepted.

use crate::error::{AppError, AppResult};
use crate::oas::operations::HttpMethod;
use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A `consumes`/`produces` list. Entries may be `null` in the source; they
/// are skipped during content negotiation.
pub type MediaTypeList = Vec<Option<String>>;

/// One Security Requirement Object: scheme identifier -> scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Root of a Swagger 2.0 document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    /// Swagger version (e.g. "2.0"). Accepts a string or a bare number.
    pub swagger: Option<Value>,
    /// Present only on OpenAPI 3.x documents, which are rejected.
    pub openapi: Option<Value>,
    /// Metadata about the API.
    pub info: Option<Info>,
    /// Transfer protocols (`http`, `https`, ...).
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Host (and optional port) serving the API.
    pub host: Option<String>,
    /// Prefix shared by every path.
    pub base_path: Option<String>,
    /// Document-wide request media types.
    pub consumes: Option<MediaTypeList>,
    /// Document-wide response media types.
    pub produces: Option<MediaTypeList>,
    /// Document-wide security requirement alternatives.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Declared security schemes keyed by identifier.
    #[serde(default)]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Path templates and their operations.
    #[serde(default)]
    pub paths: Paths,
    /// Reusable schemas referenced as `#/definitions/<name>`.
    #[serde(default)]
    pub definitions: IndexMap<String, Value>,
    /// Reusable parameters referenced as `#/parameters/<name>`.
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    /// Reusable responses referenced as `#/responses/<name>`.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// The `info` object. Only the fields the generator reports on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    /// API title.
    pub title: Option<String>,
    /// API version. Accepts a string or a bare number.
    pub version: Option<Value>,
    /// Long description.
    pub description: Option<String>,
}

/// Either an inline object or a local `$ref` to one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `{"$ref": "..."}` object.
    Ref {
        /// The reference string, e.g. `#/parameters/limit`.
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// An inline definition.
    T(T),
}

/// An operation parameter, exactly as declared.
///
/// `location` stays a raw string here; classification turns it into a
/// `ParameterLocation` and rejects unknown values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Raw `in` value.
    #[serde(rename = "in")]
    pub location: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter must be sent.
    #[serde(default)]
    pub required: bool,
    /// Primitive type for non-body parameters.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Format modifier (`int64`, `date-time`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Array item description for `type: array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
    /// Array serialisation (`csv`, `multi`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    /// Declared default value.
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
}

/// A declared security scheme.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecurityScheme {
    /// Raw `type` value (`basic`, `apiKey`, `oauth2`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Header or query parameter name for `apiKey`.
    pub name: Option<String>,
    /// `query` or `header` for `apiKey`.
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
    /// OAuth2 flow.
    pub flow: Option<String>,
}

/// A single response definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Required description.
    #[serde(default)]
    pub description: String,
    /// Body schema, if the response carries one.
    pub schema: Option<Value>,
}

/// One HTTP-verb handler of a path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Grouping tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Overrides the document `consumes`.
    pub consumes: Option<MediaTypeList>,
    /// Overrides the document `produces`.
    pub produces: Option<MediaTypeList>,
    /// Overrides the document `security`.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Responses keyed by status code or `default`.
    #[serde(default)]
    pub responses: Responses,
    /// Deprecation marker.
    #[serde(default)]
    pub deprecated: bool,
}

/// A path item: shared parameters plus the operations in document order.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    /// Parameters shared by every operation on this path.
    pub parameters: Vec<RefOr<Parameter>>,
    /// Operations keyed by verb, in the order they were declared.
    pub operations: Vec<(HttpMethod, Operation)>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a path item object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<PathItem, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut item = PathItem::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "parameters" {
                        item.parameters = map.next_value()?;
                    } else if let Ok(method) = HttpMethod::from_str(&key) {
                        let op: Operation = map.next_value()?;
                        item.operations.push((method, op));
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(item)
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}

/// The Paths Object with `x-` extensions dropped.
#[derive(Debug, Clone, Default)]
pub struct Paths(pub IndexMap<String, PathItem>);

impl Paths {
    /// Looks up a path template.
    pub fn get(&self, path: &str) -> Option<&PathItem> {
        self.0.get(path)
    }

    /// Iterates path templates in document order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PathItem> {
        self.0.iter()
    }

    /// Number of path templates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no path items are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathsVisitor;

        impl<'de> Visitor<'de> for PathsVisitor {
            type Value = Paths;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a paths object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Paths, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut items = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key.starts_with("x-") {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    let item: PathItem = map.next_value()?;
                    items.insert(key, item);
                }
                Ok(Paths(items))
            }
        }

        deserializer.deserialize_map(PathsVisitor)
    }
}

/// The Responses Object, keyed by status code string or `default`.
#[derive(Debug, Clone, Default)]
pub struct Responses(pub IndexMap<String, RefOr<Response>>);

impl Responses {
    /// Iterates responses in document order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, RefOr<Response>> {
        self.0.iter()
    }
}

/// A response-code key that may be written as a YAML integer.
struct StatusKey(String);

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StatusKeyVisitor;

        impl<'de> Visitor<'de> for StatusKeyVisitor {
            type Value = StatusKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a status code or 'default'")
            }

            fn visit_str<E>(self, v: &str) -> Result<StatusKey, E>
            where
                E: serde::de::Error,
            {
                Ok(StatusKey(v.to_owned()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<StatusKey, E>
            where
                E: serde::de::Error,
            {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_i64<E>(self, v: i64) -> Result<StatusKey, E>
            where
                E: serde::de::Error,
            {
                Ok(StatusKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(StatusKeyVisitor)
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ResponsesVisitor;

        impl<'de> Visitor<'de> for ResponsesVisitor {
            type Value = Responses;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a responses object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Responses, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut items = IndexMap::new();
                while let Some(StatusKey(code)) = map.next_key::<StatusKey>()? {
                    if code.starts_with("x-") {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    let response: RefOr<Response> = map.next_value()?;
                    items.insert(code, response);
                }
                Ok(Responses(items))
            }
        }

        deserializer.deserialize_map(ResponsesVisitor)
    }
}

/// Parses a Swagger 2.0 document from YAML or JSON text.
///
/// Rejects OpenAPI 3.x documents and Swagger versions other than 2.x.
pub fn parse_api_document(content: &str) -> AppResult<ApiDocument> {
    let document: ApiDocument = serde_yaml::from_str(content)
        .map_err(|e| AppError::General(format!("Failed to parse API document: {}", e)))?;

    if let Some(version) = &document.openapi {
        return Err(AppError::General(format!(
            "Unsupported OpenAPI version: {}. Only Swagger 2.0 documents are supported.",
            version_text(version)
        )));
    }
    if let Some(version) = &document.swagger {
        let text = version_text(version);
        if !text.starts_with('2') {
            return Err(AppError::General(format!(
                "Unsupported Swagger version: {}. Only 2.0 is supported.",
                text
            )));
        }
    }

    Ok(document)
}

impl FromStr for ApiDocument {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_api_document(s)
    }
}

fn version_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
