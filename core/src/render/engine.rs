#![deny(missing_docs)]

//! # Handlebars Renderer
//!
//! Default [`TestRenderer`] producing mocha test files for `supertest` or
//! `request`. Templates are read and compiled once, when the renderer is
//! built; a missing or malformed template is a `Resource` error.

use crate::compile::EnvDescriptor;
use crate::error::{AppError, AppResult};
use crate::render::{FileView, OperationView, TestRenderer};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

const OUTER: &str = "outer";
const OPERATION: &str = "operation";
const ASSERTIONS: &str = "assertions";
const ENV: &str = "env";

/// Template sources, one per rendered shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    /// Whole test file (`FileView`).
    pub outer: String,
    /// One operation block (`OperationView`).
    pub operation: String,
    /// Partial included by `operation` for each descriptor.
    pub assertions: String,
    /// `.env` file (`EnvDescriptor`).
    pub env: String,
}

impl TemplateSet {
    /// Templates compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            outer: include_str!("../../templates/outer.hbs").to_string(),
            operation: include_str!("../../templates/operation.hbs").to_string(),
            assertions: include_str!("../../templates/assertions.hbs").to_string(),
            env: include_str!("../../templates/env.hbs").to_string(),
        }
    }

    /// Reads `outer.hbs`, `operation.hbs`, `assertions.hbs` and `env.hbs`
    /// from `dir`.
    pub fn from_dir(dir: &Path) -> AppResult<Self> {
        Ok(Self {
            outer: read_template(dir, OUTER)?,
            operation: read_template(dir, OPERATION)?,
            assertions: read_template(dir, ASSERTIONS)?,
            env: read_template(dir, ENV)?,
        })
    }
}

fn read_template(dir: &Path, name: &str) -> AppResult<String> {
    let path = dir.join(format!("{}.hbs", name));
    std::fs::read_to_string(&path).map_err(|e| {
        AppError::Resource(format!("Failed to read template {}: {}", path.display(), e))
    })
}

mod helpers {
    use handlebars::handlebars_helper;

    handlebars_helper!(upper: |s: str| s.to_uppercase());

    // Escapes text for a single-quoted JS string literal.
    handlebars_helper!(js_string: |s: str| s
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r"));
}

/// Handlebars-backed renderer.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Compiles `templates`.
    pub fn new(templates: TemplateSet) -> AppResult<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("upper", Box::new(helpers::upper));
        registry.register_helper("js_string", Box::new(helpers::js_string));

        register(&mut registry, OUTER, &templates.outer)?;
        register(&mut registry, OPERATION, &templates.operation)?;
        register(&mut registry, ENV, &templates.env)?;
        registry
            .register_partial(ASSERTIONS, &templates.assertions)
            .map_err(|e| AppError::Resource(format!("Invalid template '{}': {}", ASSERTIONS, e)))?;

        Ok(Self { registry })
    }

    /// Renderer over the built-in templates.
    pub fn builtin() -> AppResult<Self> {
        Self::new(TemplateSet::builtin())
    }

    /// Renderer over templates read from `dir`.
    pub fn from_dir(dir: &Path) -> AppResult<Self> {
        Self::new(TemplateSet::from_dir(dir)?)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> AppResult<String> {
        self.registry
            .render(name, data)
            .map_err(|e| AppError::Render(format!("{}: {}", name, e)))
    }
}

fn register(registry: &mut Handlebars<'static>, name: &str, source: &str) -> AppResult<()> {
    registry
        .register_template_string(name, source)
        .map_err(|e| AppError::Resource(format!("Invalid template '{}': {}", name, e)))
}

impl TestRenderer for HandlebarsRenderer {
    fn render_operation(&self, operation: &OperationView<'_>) -> AppResult<String> {
        self.render(OPERATION, operation)
    }

    fn render_file(&self, file: &FileView<'_>) -> AppResult<String> {
        self.render(OUTER, file)
    }

    fn render_env(&self, env: &EnvDescriptor) -> AppResult<String> {
        self.render(ENV, env)
    }
}
