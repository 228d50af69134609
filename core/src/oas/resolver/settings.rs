#![deny(missing_docs)]

//! # Effective Settings
//!
//! `consumes`, `produces` and `security` may be declared on an operation or
//! document-wide. The operation value wins when it is non-empty, then the
//! document value, then an explicit empty list.

use crate::oas::document::{ApiDocument, Operation, SecurityRequirement};

/// Settings in force for one operation. Borrowed from the document; lives
/// only as long as that operation is being compiled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveSettings<'a> {
    /// Request media types.
    pub consumes: &'a [Option<String>],
    /// Response media types.
    pub produces: &'a [Option<String>],
    /// Security requirement alternatives.
    pub security: &'a [SecurityRequirement],
}

/// Picks the first non-empty list, or an empty one.
pub fn resolve_setting<'a, T>(operation: Option<&'a [T]>, fallback: Option<&'a [T]>) -> &'a [T] {
    operation
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.filter(|v| !v.is_empty()))
        .unwrap_or_default()
}

/// Resolves all three settings for `operation`.
pub fn resolve_effective_settings<'a>(
    document: &'a ApiDocument,
    operation: &'a Operation,
) -> EffectiveSettings<'a> {
    EffectiveSettings {
        consumes: resolve_setting(operation.consumes.as_deref(), document.consumes.as_deref()),
        produces: resolve_setting(operation.produces.as_deref(), document.produces.as_deref()),
        security: resolve_setting(operation.security.as_deref(), document.security.as_deref()),
    }
}
