#![deny(missing_docs)]

//! # Swagger Parsing Module
//!
//! - **document**: Typed model of a Swagger 2.0 document.
//! - **operations**: HTTP verbs and operation enumeration.
//! - **ref_utils**: Local `$ref` resolution.
//! - **resolver**: Per-operation settings, parameters, security and content types.

pub mod document;
pub mod operations;
pub mod ref_utils;
pub mod resolver;

pub use document::{
    parse_api_document, ApiDocument, Operation, Parameter, PathItem, RefOr, Response,
    SecurityRequirement, SecurityScheme,
};
pub use operations::{enumerate_operations, HttpMethod};
