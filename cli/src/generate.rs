#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads a Swagger 2.0 document and writes one test file per path, plus
//! `.env` when the document declares security schemes.

use std::fs;
use std::path::PathBuf;

use stt_core::{generate, parse_api_document, GeneratorConfig, HandlebarsRenderer, TestModule};

use crate::error::{CliError, CliResult};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the Swagger 2.0 document (YAML or JSON).
    #[clap(long, env = "STT_INPUT")]
    pub input: PathBuf,

    /// Directory receiving the generated files.
    #[clap(long, env = "STT_OUTPUT")]
    pub output: PathBuf,

    /// Directory with `outer.hbs`, `operation.hbs`, `assertions.hbs` and
    /// `env.hbs`. Built-in templates are used when absent.
    #[clap(long, env = "STT_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Generator configuration file (YAML or JSON).
    #[clap(long, env = "STT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Test module targeted by the output (`supertest` or `request`).
    #[clap(long)]
    pub test_module: Option<TestModule>,

    /// Assertion style tag (`should`, `expect` or `assert`).
    #[clap(long)]
    pub assertion_format: Option<String>,

    /// Only generate the given path. Repeatable.
    #[clap(long)]
    pub path: Vec<String>,

    /// Truncate descriptions to this many characters; negative disables.
    #[clap(long, allow_negative_numbers = true)]
    pub max_len: Option<i64>,
}

impl GenerateArgs {
    /// Loads the config file, if any, and applies flag overrides.
    pub fn resolve_config(&self) -> CliResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(module) = self.test_module {
            config = config.with_test_module(module);
        }
        if let Some(format) = &self.assertion_format {
            config = config.with_assertion_format(format.as_str());
        }
        if !self.path.is_empty() {
            config = config.with_paths(self.path.iter().cloned());
        }
        if let Some(max_len) = self.max_len {
            config = config.with_max_len(usize::try_from(max_len).ok());
        }
        Ok(config)
    }
}

/// Executes the generation.
///
/// Templates, configuration and document are all loaded before anything is
/// written, so a bad input leaves the output directory untouched.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let renderer = match &args.templates {
        Some(dir) => HandlebarsRenderer::from_dir(dir)?,
        None => HandlebarsRenderer::builtin()?,
    };
    let config = args.resolve_config()?;

    if !args.input.exists() {
        return Err(CliError::General(format!(
            "Swagger document not found: {:?}",
            args.input
        )));
    }
    let content = fs::read_to_string(&args.input)?;
    let document = parse_api_document(&content)?;

    let files = generate(&document, &config, &renderer)?;

    fs::create_dir_all(&args.output)?;
    for file in &files {
        let target = args.output.join(&file.name);
        fs::write(&target, &file.test)?;
        tracing::debug!(file = %target.display(), bytes = file.test.len(), "wrote file");
    }

    println!("Generated {} files in {:?}", files.len(), args.output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const PETSTORE: &str = r#"
swagger: '2.0'
info: {title: Petstore, version: '1.0'}
host: petstore.io
basePath: /v1
securityDefinitions:
  ApiKeyAuth: {type: apiKey, in: header, name: X-Api-Key}
paths:
  /pets:
    get:
      security: [{ApiKeyAuth: []}]
      responses:
        200:
          description: A list of pets
          schema: {type: array, items: {type: string}}
  /owners:
    get:
      responses:
        200: {description: OK}
"#;

    fn args(input: &Path, output: &Path) -> GenerateArgs {
        GenerateArgs {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            templates: None,
            config: None,
            test_module: None,
            assertion_format: None,
            path: Vec::new(),
            max_len: None,
        }
    }

    #[test]
    fn test_execute_writes_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("api.yaml");
        let output = dir.path().join("test/api");
        fs::write(&input, PETSTORE).unwrap();

        execute(&args(&input, &output)).unwrap();

        let pets = fs::read_to_string(output.join("pets-test.js")).unwrap();
        assert!(pets.contains("/v1/pets"));
        assert!(pets.contains("process.env.API_KEY_AUTH"));
        assert!(output.join("owners-test.js").exists());
        let env = fs::read_to_string(output.join(".env")).unwrap();
        assert!(env.contains("API_KEY_AUTH="));
    }

    #[test]
    fn test_execute_path_filter() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("api.yaml");
        let output = dir.path().join("out");
        fs::write(&input, PETSTORE).unwrap();

        let mut a = args(&input, &output);
        a.path = vec!["/owners".into()];
        execute(&a).unwrap();

        assert!(output.join("owners-test.js").exists());
        assert!(!output.join("pets-test.js").exists());
    }

    #[test]
    fn test_execute_missing_input() {
        let dir = tempdir().unwrap();
        let a = args(&dir.path().join("missing.yaml"), &dir.path().join("out"));
        let err = execute(&a).unwrap_err();
        assert!(format!("{}", err).contains("Swagger document not found"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_execute_schema_error_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("api.yaml");
        let output = dir.path().join("out");
        let yaml = r#"
swagger: '2.0'
paths:
  /pets:
    get:
      parameters: [{name: sid, in: cookie, type: string}]
      responses: {200: {description: OK}}
"#;
        fs::write(&input, yaml).unwrap();

        let err = execute(&args(&input, &output)).unwrap_err();
        assert!(format!("{}", err).contains("cookie"));
        assert!(!output.exists());
    }

    #[test]
    fn test_execute_missing_templates_dir() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("api.yaml");
        fs::write(&input, PETSTORE).unwrap();

        let mut a = args(&input, &dir.path().join("out"));
        a.templates = Some(dir.path().join("no-templates"));
        let err = execute(&a).unwrap_err();
        assert!(format!("{}", err).contains("Resource Error"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("stt.yaml");
        fs::write(
            &config_path,
            "testModule: request\nassertionFormat: assert\nmaxLen: 20\n",
        )
        .unwrap();

        let mut a = args(Path::new("api.yaml"), Path::new("out"));
        a.config = Some(config_path);
        a.assertion_format = Some("expect".into());
        a.max_len = Some(-1);

        let config = a.resolve_config().unwrap();
        assert_eq!(config.test_module, TestModule::Request);
        assert_eq!(config.assertion_format, "expect");
        assert_eq!(config.max_len, None);
    }
}
