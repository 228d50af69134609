#![deny(missing_docs)]

//! # Test Suite Generator
//!
//! Compiles a document and renders the result into `{name, test}` files.

use crate::compile::{
    compile_document, document_host, document_scheme, CompiledSuite, ENV_FILE_NAME,
};
use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::oas::document::ApiDocument;
use crate::render::{FileView, OperationView, TestRenderer};
use indexmap::IndexSet;
use serde::Serialize;

/// One generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub name: String,
    /// Rendered file contents.
    pub test: String,
}

/// Compiles `document` and renders every file, plus `.env` when the document
/// declares security schemes.
///
/// Nothing is rendered if compilation fails.
pub fn generate(
    document: &ApiDocument,
    config: &GeneratorConfig,
    renderer: &impl TestRenderer,
) -> AppResult<Vec<GeneratedFile>> {
    let suite = compile_document(document, config)?;
    render_suite(document, config, &suite, renderer)
}

/// Renders an already compiled suite.
pub fn render_suite(
    document: &ApiDocument,
    config: &GeneratorConfig,
    suite: &CompiledSuite,
    renderer: &impl TestRenderer,
) -> AppResult<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(suite.paths.len() + 1);
    let mut names = IndexSet::new();

    for path in &suite.paths {
        let tests = path
            .operations
            .iter()
            .map(|op| {
                renderer.render_operation(&OperationView {
                    method: op.method,
                    summary: op.summary.as_deref(),
                    testmodule: config.test_module,
                    assertion: &config.assertion_format,
                    tests: &op.tests,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let test = renderer.render_file(&FileView {
            description: &path.path,
            testmodule: config.test_module,
            scheme: document_scheme(document),
            host: document_host(document),
            assertion: &config.assertion_format,
            tests,
            import_validator: path.import_validator,
            import_env: path.import_env,
        })?;

        if !names.insert(path.file_name.clone()) {
            tracing::warn!(
                file = %path.file_name,
                path = %path.path,
                "file name already generated for another path"
            );
        }
        files.push(GeneratedFile {
            name: path.file_name.clone(),
            test,
        });
    }

    if let Some(env) = &suite.env {
        files.push(GeneratedFile {
            name: ENV_FILE_NAME.to_string(),
            test: renderer.render_env(env)?,
        });
    }

    Ok(files)
}
