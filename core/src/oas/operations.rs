#![deny(missing_docs)]

//! # Operation Enumeration
//!
//! The HTTP verbs a Swagger 2.0 path item may carry, and iteration over the
//! ones a given path item actually declares.

use crate::oas::document::{Operation, PathItem};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// HTTP verbs recognised as operation keys in a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `put`
    Put,
    /// `post`
    Post,
    /// `delete`
    Delete,
    /// `options`
    Options,
    /// `head`
    Head,
    /// `patch`
    Patch,
}

impl HttpMethod {
    /// All recognised verbs.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    /// The lowercase key used in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    /// Path item keys are case-sensitive; `GET` is not an operation key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yields the operations declared on a path item, in document order.
pub fn enumerate_operations(
    path_item: &PathItem,
) -> impl Iterator<Item = (HttpMethod, &Operation)> + '_ {
    path_item.operations.iter().map(|(method, op)| (*method, op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::parse_api_document;

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!("patch".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert!("GET".parse::<HttpMethod>().is_err());
        assert!("trace".parse::<HttpMethod>().is_err());
        assert!("parameters".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_enumerate_only_present_verbs() {
        let yaml = r#"
swagger: '2.0'
paths:
  /pets/{id}:
    parameters:
      - {name: id, in: path, required: true, type: string}
    summary: not an operation
    head: {responses: {200: {description: OK}}}
    get: {responses: {200: {description: OK}}}
"#;
        let doc = parse_api_document(yaml).unwrap();
        let item = doc.paths.get("/pets/{id}").unwrap();
        let verbs: Vec<_> = enumerate_operations(item).map(|(m, _)| m).collect();
        assert_eq!(verbs, vec![HttpMethod::Head, HttpMethod::Get]);
    }

    #[test]
    fn test_display_matches_document_key() {
        assert_eq!(HttpMethod::Options.to_string(), "options");
    }
}
