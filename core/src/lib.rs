#![deny(missing_docs)]

//! # STT Core
//!
//! Compiles Swagger 2.0 API documents into test descriptors and renders them
//! into API test suites.
//!
//! Pipeline: document -> per-operation resolution (settings, parameters,
//! security, content types) -> descriptors -> renderer -> `{name, test}` files.

/// Shared error types.
pub mod error;

/// Generator configuration.
pub mod config;

/// Swagger document model and per-operation resolution.
pub mod oas;

/// Descriptor compilation.
pub mod compile;

/// Renderer seam and the Handlebars implementation.
pub mod render;

/// End-to-end generation.
pub mod generator;

pub use compile::{
    compile_document, CompiledSuite, EnvDescriptor, OperationDescriptor, PathSuite,
    TestDescriptor,
};
pub use config::{GeneratorConfig, TestModule};
pub use error::{AppError, AppResult, SchemaError};
pub use generator::{generate, render_suite, GeneratedFile};
pub use oas::{parse_api_document, ApiDocument, HttpMethod};
pub use render::{FileView, HandlebarsRenderer, OperationView, TemplateSet, TestRenderer};
