#![deny(missing_docs)]

//! # Descriptor Assembly
//!
//! Turns one operation into its test descriptors: one per response code per
//! negotiated content-type pair. Everything derived along the way (effective
//! settings, classified parameters, security) is local to the call.

use crate::compile::path::build_request_path;
use crate::config::GeneratorConfig;
use crate::error::{AppError, AppResult};
use crate::oas::document::{ApiDocument, Operation, Parameter, PathItem};
use crate::oas::operations::HttpMethod;
use crate::oas::ref_utils::{inline_definitions, resolve_parameter, resolve_response};
use crate::oas::resolver::{
    classify_parameters, negotiate_content, resolve_effective_settings, resolve_security,
    AuthInjection,
};
use serde::Serialize;
use serde_json::Value;

/// A fully resolved, renderer-ready test case.
///
/// `(path, method, response_code, content_type, return_type)` identifies it
/// within a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDescriptor {
    /// Status code key, or `default`.
    pub response_code: String,
    /// True for the `default` response.
    pub is_default: bool,
    /// Response description, truncated per `maxLen`.
    pub description: String,
    /// Assertion style tag from the config.
    pub assertion: String,
    /// True when the response declares no schema.
    pub no_schema: bool,
    /// Pretty-printed response schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// `in: body` parameters.
    pub body_parameters: Vec<Parameter>,
    /// `in: query` parameters.
    pub query_parameters: Vec<Parameter>,
    /// `in: header` parameters.
    pub header_parameters: Vec<Parameter>,
    /// `in: path` parameters.
    pub path_parameters: Vec<Parameter>,
    /// `in: formData` parameters.
    pub form_parameters: Vec<Parameter>,
    /// API key carried in the query string.
    pub query_api_key: Option<AuthInjection>,
    /// API key carried in a header.
    pub header_api_key: Option<AuthInjection>,
    /// Basic or Bearer `Authorization` header.
    pub header_security: Option<AuthInjection>,
    /// Request path or URL.
    pub path: String,
    /// Request media type.
    pub content_type: String,
    /// Expected response media type.
    pub return_type: String,
}

impl TestDescriptor {
    /// Whether the rendered test validates the body against a schema.
    pub fn requires_validator(&self) -> bool {
        !self.no_schema
    }

    /// Whether the rendered test reads credentials from the environment.
    pub fn requires_env(&self) -> bool {
        self.query_api_key.is_some()
            || self.header_api_key.is_some()
            || self.header_security.is_some()
    }
}

/// The descriptors of one verb on one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Operation summary, if any.
    pub summary: Option<String>,
    /// Operation identifier, if any.
    pub operation_id: Option<String>,
    /// Descriptors in response-code, then content-pair order.
    pub tests: Vec<TestDescriptor>,
}

impl OperationDescriptor {
    /// Any descriptor needs a schema validator.
    pub fn requires_validator(&self) -> bool {
        self.tests.iter().any(TestDescriptor::requires_validator)
    }

    /// Any descriptor needs environment credentials.
    pub fn requires_env(&self) -> bool {
        self.tests.iter().any(TestDescriptor::requires_env)
    }
}

/// Assembles the descriptors for `method` on `path`.
///
/// # Errors
///
/// Propagates every `SchemaError` raised while classifying parameters,
/// resolving security or following `$ref`s.
pub fn assemble_operation(
    document: &ApiDocument,
    config: &GeneratorConfig,
    path: &str,
    path_item: &PathItem,
    method: HttpMethod,
    operation: &Operation,
) -> AppResult<OperationDescriptor> {
    let settings = resolve_effective_settings(document, operation);

    let path_params = path_item
        .parameters
        .iter()
        .map(|p| resolve_parameter(document, p))
        .collect::<Result<Vec<_>, _>>()?;
    let operation_params = operation
        .parameters
        .iter()
        .map(|p| resolve_parameter(document, p))
        .collect::<Result<Vec<_>, _>>()?;
    let params = classify_parameters(path, path_params, operation_params)?;

    let security = resolve_security(settings.security, &document.security_definitions)?;

    let request_path = build_request_path(
        document,
        path,
        config.test_module,
        &params.query,
        security.query_api_key.as_ref(),
    );
    let pairs = negotiate_content(settings.consumes, settings.produces);

    let mut tests = Vec::new();
    for (code, response) in operation.responses.iter() {
        let response = resolve_response(document, response)?;
        let schema = response
            .schema
            .as_ref()
            .map(|s| pretty_schema(s, document))
            .transpose()?;
        let description = truncate_description(&response.description, config.max_len);

        for pair in &pairs {
            tests.push(TestDescriptor {
                response_code: code.clone(),
                is_default: code == "default",
                description: description.clone(),
                assertion: config.assertion_format.clone(),
                no_schema: schema.is_none(),
                schema: schema.clone(),
                body_parameters: params.body.clone(),
                query_parameters: params.query.clone(),
                header_parameters: params.header.clone(),
                path_parameters: params.path.clone(),
                form_parameters: params.form_data.clone(),
                query_api_key: security.query_api_key.clone(),
                header_api_key: security.header_api_key.clone(),
                header_security: security.header_security.clone(),
                path: request_path.clone(),
                content_type: pair.consume.clone(),
                return_type: pair.produce.clone(),
            });
        }
    }

    tracing::debug!(
        path,
        method = method.as_str(),
        descriptors = tests.len(),
        "assembled operation"
    );

    Ok(OperationDescriptor {
        method,
        summary: operation.summary.clone(),
        operation_id: operation.operation_id.clone(),
        tests,
    })
}

/// Renders a response schema as 2-space indented JSON, with local
/// definitions inlined.
pub fn pretty_schema(schema: &Value, document: &ApiDocument) -> AppResult<String> {
    let inlined = inline_definitions(schema, &document.definitions);
    serde_json::to_string_pretty(&inlined)
        .map_err(|e| AppError::General(format!("Failed to serialize response schema: {}", e)))
}

/// Cuts `text` to at most `max_len` characters.
pub fn truncate_description(text: &str, max_len: Option<usize>) -> String {
    match max_len {
        Some(limit) => text.chars().take(limit).collect(),
        None => text.to_string(),
    }
}
