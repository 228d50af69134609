#![deny(missing_docs)]

//! # Rendering
//!
//! The seam between compiled descriptors and test source text.
//!
//! A renderer sees three shapes: an [`OperationView`] (one verb's
//! descriptors), a [`FileView`] (one path, with its rendered operations) and
//! the [`EnvDescriptor`]. The field names they serialise to are the contract
//! templates rely on.

pub mod engine;

pub use engine::{HandlebarsRenderer, TemplateSet};

use crate::compile::{EnvDescriptor, TestDescriptor};
use crate::config::TestModule;
use crate::error::AppResult;
use crate::oas::operations::HttpMethod;
use serde::Serialize;

/// Context for rendering one operation block.
#[derive(Debug, Clone, Serialize)]
pub struct OperationView<'a> {
    /// HTTP verb (lowercase).
    pub method: HttpMethod,
    /// Operation summary.
    pub summary: Option<&'a str>,
    /// Target test module.
    pub testmodule: TestModule,
    /// Assertion style tag.
    pub assertion: &'a str,
    /// Descriptors of this operation.
    pub tests: &'a [TestDescriptor],
}

/// Context for rendering one test file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileView<'a> {
    /// Path template the file covers.
    pub description: &'a str,
    /// Target test module.
    pub testmodule: TestModule,
    /// Scheme for absolute requests.
    pub scheme: &'a str,
    /// Host for absolute requests.
    pub host: &'a str,
    /// Assertion style tag.
    pub assertion: &'a str,
    /// Rendered operation blocks, in document order.
    pub tests: Vec<String>,
    /// Some test validates a response schema.
    pub import_validator: bool,
    /// Some test reads credentials from the environment.
    pub import_env: bool,
}

/// Produces test source from descriptors.
///
/// Implementors decide the output language and layout; the pipeline only
/// hands over the views above.
pub trait TestRenderer {
    /// Renders one operation block.
    fn render_operation(&self, operation: &OperationView<'_>) -> AppResult<String>;

    /// Renders a complete test file around its operation blocks.
    fn render_file(&self, file: &FileView<'_>) -> AppResult<String>;

    /// Renders the environment file listing credential variables.
    fn render_env(&self, env: &EnvDescriptor) -> AppResult<String>;
}
