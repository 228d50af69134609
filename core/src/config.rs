#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Options that shape the generated suite. Loadable from a YAML or JSON file
//! with camelCase keys; every key is optional.
//!
//! ```yaml
//! testModule: request
//! assertionFormat: expect
//! pathName: ["/pets", "/pets/{id}"]
//! maxLen: -1
//! ```

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The HTTP client library the generated tests are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestModule {
    /// `supertest`: relative paths against a shared agent; query values are
    /// set through `.query(..)`.
    #[default]
    Supertest,
    /// `request`: absolute URLs with the query string baked into the path.
    Request,
}

impl TestModule {
    /// All supported modules.
    pub const ALL: [TestModule; 2] = [TestModule::Supertest, TestModule::Request];

    /// The module name as used in templates and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestModule::Supertest => "supertest",
            TestModule::Request => "request",
        }
    }

    /// Whether request paths must carry `scheme://host`.
    pub fn needs_absolute_url(&self) -> bool {
        matches!(self, TestModule::Request)
    }

    /// Whether query parameters are encoded into the request path.
    pub fn inlines_query_string(&self) -> bool {
        matches!(self, TestModule::Request)
    }
}

impl FromStr for TestModule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestModule::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unsupported test module '{}' (expected one of: supertest, request)",
                    s
                )
            })
    }
}

impl fmt::Display for TestModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default truncation length for test descriptions.
pub const DEFAULT_MAX_LEN: usize = 80;

/// Configuration of a single generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Target HTTP client library.
    pub test_module: TestModule,
    /// Assertion style tag (`should`, `expect`, `assert`). Passed through.
    pub assertion_format: String,
    /// Paths to generate for. Empty means every path.
    pub path_name: Vec<String>,
    /// Description truncation; `None` disables it. `-1` in a file means `None`.
    #[serde(deserialize_with = "deserialize_max_len")]
    pub max_len: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            test_module: TestModule::default(),
            assertion_format: "should".to_string(),
            path_name: Vec::new(),
            max_len: Some(DEFAULT_MAX_LEN),
        }
    }
}

impl GeneratorConfig {
    /// Sets the test module.
    pub fn with_test_module(mut self, module: TestModule) -> Self {
        self.test_module = module;
        self
    }

    /// Sets the assertion style tag.
    pub fn with_assertion_format(mut self, format: impl Into<String>) -> Self {
        self.assertion_format = format.into();
        self
    }

    /// Restricts generation to the given paths.
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path_name = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets description truncation.
    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    /// Reads a YAML or JSON configuration file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::General(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::General(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}

fn deserialize_max_len<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|n| usize::try_from(n).ok()))
}
