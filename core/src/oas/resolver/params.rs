#![deny(missing_docs)]

//! # Parameter Classification
//!
//! Sorts path-level and operation-level parameters into five buckets by
//! location. Path-level parameters come first; operation-level ones are
//! appended without de-duplication. `body` is only legal on an operation.

use crate::error::SchemaError;
use crate::oas::document::Parameter;
use serde::Serialize;
use std::fmt;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    /// A `{name}` segment of the path template.
    Path,
    /// The query string.
    Query,
    /// A request header.
    Header,
    /// A form field (`application/x-www-form-urlencoded` or multipart).
    FormData,
    /// The request body.
    Body,
}

impl ParameterLocation {
    /// Classifies a parameter by its raw `in` value.
    pub fn of(param: &Parameter) -> Result<Self, SchemaError> {
        match param.location.as_str() {
            "path" => Ok(ParameterLocation::Path),
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "formData" => Ok(ParameterLocation::FormData),
            "body" => Ok(ParameterLocation::Body),
            other => Err(SchemaError::UnrecognizedLocation {
                name: param.name.clone(),
                location: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        };
        f.write_str(s)
    }
}

/// Parameters of one operation, bucketed by location.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassifiedParameters {
    /// `in: path`
    pub path: Vec<Parameter>,
    /// `in: query`
    pub query: Vec<Parameter>,
    /// `in: header`
    pub header: Vec<Parameter>,
    /// `in: formData`
    pub form_data: Vec<Parameter>,
    /// `in: body`
    pub body: Vec<Parameter>,
}

impl ClassifiedParameters {
    fn bucket_mut(&mut self, location: ParameterLocation) -> &mut Vec<Parameter> {
        match location {
            ParameterLocation::Path => &mut self.path,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::Header => &mut self.header,
            ParameterLocation::FormData => &mut self.form_data,
            ParameterLocation::Body => &mut self.body,
        }
    }

    /// Total number of parameters across all buckets.
    pub fn len(&self) -> usize {
        self.path.len()
            + self.query.len()
            + self.header.len()
            + self.form_data.len()
            + self.body.len()
    }

    /// True when no bucket holds anything.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classifies the parameters of one operation on `path`.
///
/// # Errors
///
/// * `SchemaError::UnrecognizedLocation` for an unknown `in`.
/// * `SchemaError::BodyAtPathLevel` for a `body` parameter in the path item's list.
pub fn classify_parameters<'p>(
    path: &str,
    path_params: impl IntoIterator<Item = &'p Parameter>,
    operation_params: impl IntoIterator<Item = &'p Parameter>,
) -> Result<ClassifiedParameters, SchemaError> {
    let mut classified = ClassifiedParameters::default();

    for param in path_params {
        let location = ParameterLocation::of(param)?;
        if location == ParameterLocation::Body {
            return Err(SchemaError::BodyAtPathLevel {
                name: param.name.clone(),
                path: path.to_string(),
            });
        }
        classified.bucket_mut(location).push(param.clone());
    }

    for param in operation_params {
        let location = ParameterLocation::of(param)?;
        classified.bucket_mut(location).push(param.clone());
    }

    Ok(classified)
}
