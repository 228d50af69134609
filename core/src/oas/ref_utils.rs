#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Resolution of local Swagger 2.0 `$ref`s (`#/parameters/..`,
//! `#/responses/..`, `#/definitions/..`). External documents are never
//! fetched.

use crate::error::SchemaError;
use crate::oas::document::{ApiDocument, Parameter, RefOr, Response};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

/// Extracts the component name from a `$ref` of the form `#/{section}/{name}`.
///
/// Returns `None` if the reference is not local or targets another section.
pub(crate) fn extract_component_name(ref_str: &str, section: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix("#/")?;
    let (head, name) = pointer.split_once('/')?;
    if head != section || name.is_empty() || name.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(name))
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded).decode_utf8_lossy().into_owned()
}

/// Resolves an inline-or-referenced parameter against `#/parameters`.
pub fn resolve_parameter<'a>(
    document: &'a ApiDocument,
    param: &'a RefOr<Parameter>,
) -> Result<&'a Parameter, SchemaError> {
    match param {
        RefOr::T(p) => Ok(p),
        RefOr::Ref { reference } => extract_component_name(reference, "parameters")
            .and_then(|name| document.parameters.get(&name))
            .ok_or_else(|| SchemaError::UnresolvedReference {
                reference: reference.clone(),
            }),
    }
}

/// Resolves an inline-or-referenced response against `#/responses`.
pub fn resolve_response<'a>(
    document: &'a ApiDocument,
    response: &'a RefOr<Response>,
) -> Result<&'a Response, SchemaError> {
    match response {
        RefOr::T(r) => Ok(r),
        RefOr::Ref { reference } => extract_component_name(reference, "responses")
            .and_then(|name| document.responses.get(&name))
            .ok_or_else(|| SchemaError::UnresolvedReference {
                reference: reference.clone(),
            }),
    }
}

/// Returns a copy of `schema` with `#/definitions/..` references replaced by
/// their targets.
///
/// A reference that would recurse into a definition already being expanded,
/// or that names an unknown definition, is left as a `$ref`.
pub fn inline_definitions(schema: &Value, definitions: &IndexMap<String, Value>) -> Value {
    let mut stack = Vec::new();
    inline_value(schema, definitions, &mut stack)
}

fn inline_value(
    value: &Value,
    definitions: &IndexMap<String, Value>,
    stack: &mut Vec<String>,
) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                let target = extract_component_name(reference, "definitions")
                    .filter(|name| !stack.contains(name))
                    .and_then(|name| definitions.get(&name).map(|def| (name, def)));
                return match target {
                    Some((name, def)) => {
                        stack.push(name);
                        let expanded = inline_value(def, definitions, stack);
                        stack.pop();
                        expanded
                    }
                    None => value.clone(),
                };
            }
            let inlined: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), inline_value(v, definitions, stack)))
                .collect();
            Value::Object(inlined)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|v| inline_value(v, definitions, stack))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_component_name() {
        assert_eq!(
            extract_component_name("#/definitions/Pet", "definitions"),
            Some("Pet".to_string())
        );
        assert_eq!(
            extract_component_name("#/definitions/a~1b%20c", "definitions"),
            Some("a/b c".to_string())
        );
        assert_eq!(extract_component_name("#/parameters/x", "definitions"), None);
        assert_eq!(extract_component_name("other.yaml#/definitions/Pet", "definitions"), None);
        assert_eq!(extract_component_name("#/definitions/", "definitions"), None);
    }

    #[test]
    fn test_resolve_parameter_ref() {
        let mut doc = ApiDocument::default();
        let limit = Parameter {
            name: "limit".into(),
            location: "query".into(),
            description: None,
            required: false,
            param_type: Some("integer".into()),
            format: None,
            schema: None,
            items: None,
            collection_format: None,
            default_value: None,
            allowed_values: None,
        };
        doc.parameters.insert("limit".into(), limit.clone());

        let param = RefOr::Ref {
            reference: "#/parameters/limit".into(),
        };
        assert_eq!(resolve_parameter(&doc, &param).unwrap(), &limit);

        let missing = RefOr::Ref {
            reference: "#/parameters/offset".into(),
        };
        assert_eq!(
            resolve_parameter(&doc, &missing).unwrap_err(),
            SchemaError::UnresolvedReference {
                reference: "#/parameters/offset".into()
            }
        );
    }

    #[test]
    fn test_inline_definitions_nested_and_recursive() {
        let mut defs = IndexMap::new();
        defs.insert(
            "Pet".to_string(),
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "owner": {"$ref": "#/definitions/Person"}
                }
            }),
        );
        defs.insert(
            "Person".to_string(),
            json!({
                "type": "object",
                "properties": {"pets": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}}
            }),
        );

        let schema = json!({"type": "array", "items": {"$ref": "#/definitions/Pet"}});
        let inlined = inline_definitions(&schema, &defs);

        assert_eq!(inlined["items"]["properties"]["id"], json!({"type": "integer"}));
        assert_eq!(
            inlined["items"]["properties"]["owner"]["properties"]["pets"]["items"],
            json!({"$ref": "#/definitions/Pet"})
        );
    }

    #[test]
    fn test_inline_definitions_unknown_left_alone() {
        let schema = json!({"$ref": "#/definitions/Missing"});
        assert_eq!(inline_definitions(&schema, &IndexMap::new()), schema);
    }
}
