//! End-to-end generation through the public API.

use pretty_assertions::assert_eq;
use stt_core::{
    compile_document, generate, parse_api_document, AppError, GeneratorConfig,
    HandlebarsRenderer, SchemaError, TestModule,
};

const PETS: &str = r#"
swagger: '2.0'
info: {title: Pets, version: '1.0'}
paths:
  /pets:
    get:
      produces: [application/json]
      responses:
        200:
          description: A list of pets
          schema:
            type: array
            items: {type: string}
"#;

#[test]
fn scenario_single_operation_with_schema() {
    let doc = parse_api_document(PETS).unwrap();
    let suite = compile_document(&doc, &GeneratorConfig::default()).unwrap();

    assert_eq!(suite.descriptor_count(), 1);
    let path = &suite.paths[0];
    assert_eq!(path.file_name, "pets-test.js");
    assert!(path.import_validator);
    assert!(!path.import_env);

    let test = &path.operations[0].tests[0];
    assert_eq!(test.response_code, "200");
    assert!(!test.no_schema);
    assert_eq!(
        test.schema.as_deref(),
        Some("{\n  \"type\": \"array\",\n  \"items\": {\n    \"type\": \"string\"\n  }\n}")
    );
    assert_eq!(test.path, "/pets");
    assert!(suite.env.is_none());
}

#[test]
fn scenario_default_content_types() {
    let yaml = PETS.replace("      produces: [application/json]\n", "");
    let doc = parse_api_document(&yaml).unwrap();
    let suite = compile_document(&doc, &GeneratorConfig::default()).unwrap();

    let tests = &suite.paths[0].operations[0].tests;
    assert_eq!(tests.len(), 1);
    assert_eq!(
        (tests[0].content_type.as_str(), tests[0].return_type.as_str()),
        ("application/json", "application/json")
    );
}

#[test]
fn scenario_header_api_key_and_env_file() {
    let yaml = r#"
swagger: '2.0'
host: petstore.io
basePath: /v1/
securityDefinitions:
  ApiKeyAuth: {type: apiKey, in: header, name: X-Api-Key}
paths:
  /pets:
    get:
      security: [{ApiKeyAuth: []}]
      responses:
        200: {description: OK}
"#;
    let doc = parse_api_document(yaml).unwrap();
    let config = GeneratorConfig::default();
    let suite = compile_document(&doc, &config).unwrap();

    let test = &suite.paths[0].operations[0].tests[0];
    let key = test.header_api_key.as_ref().unwrap();
    assert_eq!(key.name, "API_KEY_AUTH");
    assert_eq!(key.kind, "X-Api-Key");
    assert_eq!(test.path, "/v1/pets");
    assert!(suite.paths[0].import_env);

    let files = generate(&doc, &config, &HandlebarsRenderer::builtin().unwrap()).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["pets-test.js", ".env"]);
    assert!(files[1].test.contains("API_KEY_AUTH"));
    assert!(files[0].test.contains("require('dotenv')"));
}

#[test]
fn scenario_request_module_absolute_url() {
    let yaml = r#"
swagger: '2.0'
host: api.example.com
schemes: [https]
paths:
  /search:
    get:
      parameters:
        - {name: q, in: query, type: string}
        - {name: limit, in: query, type: integer}
      responses:
        default: {description: Anything}
"#;
    let doc = parse_api_document(yaml).unwrap();
    let config = GeneratorConfig::default().with_test_module(TestModule::Request);
    let suite = compile_document(&doc, &config).unwrap();

    let test = &suite.paths[0].operations[0].tests[0];
    assert_eq!(test.path, "https://api.example.com/search?q=DATA&limit=DATA");
    assert!(test.is_default);
    assert!(test.no_schema);
    assert!(!suite.import_validator);
}

#[test]
fn unrecognized_location_aborts_before_output() {
    let yaml = r#"
swagger: '2.0'
paths:
  /pets:
    get:
      responses: {200: {description: OK}}
  /session:
    get:
      parameters: [{name: sid, in: cookie, type: string}]
      responses: {200: {description: OK}}
"#;
    let doc = parse_api_document(yaml).unwrap();
    let result = generate(
        &doc,
        &GeneratorConfig::default(),
        &HandlebarsRenderer::builtin().unwrap(),
    );

    match result {
        Err(AppError::Schema(SchemaError::UnrecognizedLocation { name, location })) => {
            assert_eq!(name, "sid");
            assert_eq!(location, "cookie");
        }
        other => panic!("expected a schema error, got {:?}", other),
    }
}
