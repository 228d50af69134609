#![deny(missing_docs)]

//! # Compilation Module
//!
//! Walks the selected paths of a document and produces every test
//! descriptor, grouped per path and per operation.
//!
//! - **descriptor**: per-operation assembly.
//! - **path**: request path construction.
//! - **naming**: test file names.
//! - **env**: the `.env` descriptor.

pub mod descriptor;
pub mod env;
pub mod naming;
pub mod path;

pub use descriptor::{assemble_operation, OperationDescriptor, TestDescriptor};
pub use env::{build_env_descriptor, EnvDescriptor, ENV_FILE_NAME};
pub use naming::test_file_name;
pub use path::{build_request_path, document_host, document_scheme};

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::oas::document::{ApiDocument, PathItem};
use crate::oas::operations::enumerate_operations;
use indexmap::IndexSet;

/// Everything generated for one path template.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSuite {
    /// Path template, e.g. `/pets/{id}`.
    pub path: String,
    /// Output file name.
    pub file_name: String,
    /// Operations in document order.
    pub operations: Vec<OperationDescriptor>,
    /// Some descriptor on this path validates a schema.
    pub import_validator: bool,
    /// Some descriptor on this path reads credentials from the environment.
    pub import_env: bool,
}

/// Result of compiling a document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSuite {
    /// One entry per generated path.
    pub paths: Vec<PathSuite>,
    /// Present when the document declares security schemes.
    pub env: Option<EnvDescriptor>,
    /// Some descriptor in the run validates a schema.
    pub import_validator: bool,
    /// Some descriptor in the run reads credentials from the environment.
    pub import_env: bool,
    /// Requested paths absent from the document.
    pub skipped_paths: Vec<String>,
}

impl CompiledSuite {
    /// Total number of descriptors.
    pub fn descriptor_count(&self) -> usize {
        self.paths
            .iter()
            .flat_map(|p| &p.operations)
            .map(|o| o.tests.len())
            .sum()
    }
}

/// Compiles every selected path of `document`.
///
/// With an empty `pathName` every path is compiled in document order;
/// otherwise the requested paths are compiled in the order given, and any
/// that the document lacks are skipped with a warning.
///
/// # Errors
///
/// The first `SchemaError` aborts the run; nothing partial is returned.
pub fn compile_document(
    document: &ApiDocument,
    config: &GeneratorConfig,
) -> AppResult<CompiledSuite> {
    let (selected, skipped_paths) = select_paths(document, config);

    let mut paths = Vec::with_capacity(selected.len());
    for (path, item) in selected {
        paths.push(compile_path(document, config, path, item)?);
    }

    let env = if document.security_definitions.is_empty() {
        None
    } else {
        Some(build_env_descriptor(
            document.security_definitions.keys().map(String::as_str),
        ))
    };

    let suite = CompiledSuite {
        import_validator: paths.iter().any(|p| p.import_validator),
        import_env: paths.iter().any(|p| p.import_env),
        paths,
        env,
        skipped_paths,
    };

    tracing::info!(
        paths = suite.paths.len(),
        descriptors = suite.descriptor_count(),
        skipped = suite.skipped_paths.len(),
        "compiled document"
    );

    Ok(suite)
}

fn select_paths<'a>(
    document: &'a ApiDocument,
    config: &'a GeneratorConfig,
) -> (Vec<(&'a str, &'a PathItem)>, Vec<String>) {
    if config.path_name.is_empty() {
        let all = document
            .paths
            .iter()
            .map(|(path, item)| (path.as_str(), item))
            .collect();
        return (all, Vec::new());
    }

    let requested: IndexSet<&str> = config.path_name.iter().map(String::as_str).collect();
    let mut selected = Vec::new();
    let mut skipped = Vec::new();
    for path in requested {
        match document.paths.get(path) {
            Some(item) => selected.push((path, item)),
            None => {
                tracing::warn!(path, "requested path not found in document, skipping");
                skipped.push(path.to_string());
            }
        }
    }
    (selected, skipped)
}

fn compile_path(
    document: &ApiDocument,
    config: &GeneratorConfig,
    path: &str,
    item: &PathItem,
) -> AppResult<PathSuite> {
    let mut operations = Vec::new();
    for (method, operation) in enumerate_operations(item) {
        operations.push(assemble_operation(
            document, config, path, item, method, operation,
        )?);
    }

    Ok(PathSuite {
        path: path.to_string(),
        file_name: test_file_name(path),
        import_validator: operations.iter().any(OperationDescriptor::requires_validator),
        import_env: operations.iter().any(OperationDescriptor::requires_env),
        operations,
    })
}
