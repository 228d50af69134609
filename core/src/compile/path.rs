#![deny(missing_docs)]

//! # Request Path Construction
//!
//! Builds the path (or absolute URL) each generated request targets.
//! `{param}` placeholders in the template are left for the renderer.

use crate::config::TestModule;
use crate::oas::document::{ApiDocument, Parameter};
use crate::oas::resolver::AuthInjection;

/// Scheme used when the document lists none.
pub const DEFAULT_SCHEME: &str = "http";

/// Host used when the document omits `host`.
pub const DEFAULT_HOST: &str = "localhost:10010";

/// Value written for every query parameter in an inlined query string.
pub const QUERY_VALUE_PLACEHOLDER: &str = "DATA";

/// First declared scheme, or `http`.
pub fn document_scheme(document: &ApiDocument) -> &str {
    document
        .schemes
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_SCHEME)
}

/// Declared host, or `localhost:10010`.
pub fn document_host(document: &ApiDocument) -> &str {
    document.host.as_deref().unwrap_or(DEFAULT_HOST)
}

/// `basePath` without a trailing slash; `/` and absence both yield `""`.
pub fn normalized_base_path(document: &ApiDocument) -> &str {
    document
        .base_path
        .as_deref()
        .unwrap_or("")
        .trim_end_matches('/')
}

/// Builds the request target for `path`.
///
/// `request` gets `scheme://host` in front and a query string assigning
/// [`QUERY_VALUE_PLACEHOLDER`] to every query parameter. A query API key is
/// appended last as `<name>=` so the test can concatenate the credential.
pub fn build_request_path(
    document: &ApiDocument,
    path: &str,
    module: TestModule,
    query_params: &[Parameter],
    query_api_key: Option<&AuthInjection>,
) -> String {
    let mut target = String::new();
    if module.needs_absolute_url() {
        target.push_str(document_scheme(document));
        target.push_str("://");
        target.push_str(document_host(document));
    }
    target.push_str(normalized_base_path(document));
    target.push_str(path);

    if module.inlines_query_string() {
        let mut pairs: Vec<String> = query_params
            .iter()
            .map(|p| format!("{}={}", p.name, QUERY_VALUE_PLACEHOLDER))
            .collect();
        if let Some(key) = query_api_key {
            pairs.push(format!("{}=", key.kind));
        }
        if !pairs.is_empty() {
            target.push('?');
            target.push_str(&pairs.join("&"));
        }
    }

    target
}
