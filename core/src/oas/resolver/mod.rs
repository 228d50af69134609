#![deny(missing_docs)]

//! # Resolver Module
//!
//! Per-operation derivations over the read-only document:
//! - **settings**: effective `consumes`/`produces`/`security`.
//! - **params**: parameter classification by location.
//! - **security**: credential injection points from security schemes.
//! - **content**: `consumes` × `produces` expansion.

pub mod content;
pub mod params;
pub mod security;
pub mod settings;

pub use content::{negotiate_content, ContentPair, DEFAULT_MEDIA_TYPE};
pub use params::{classify_parameters, ClassifiedParameters, ParameterLocation};
pub use security::{
    env_var_name, resolve_security, ApiKeyLocation, AuthInjection, SecurityInjections,
    SecuritySchemeType,
};
pub use settings::{resolve_effective_settings, resolve_setting, EffectiveSettings};
