#![deny(missing_docs)]

//! # Content Negotiation
//!
//! Expands effective `consumes` × `produces` into request/response media type
//! pairs. An empty side is replaced by `application/json`; `null` entries are
//! dropped before the expansion.

use serde::Serialize;

/// Media type assumed when a side declares nothing.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// One request/response media type combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPair {
    /// Request `Content-Type`.
    pub consume: String,
    /// Expected response media type.
    pub produce: String,
}

impl ContentPair {
    fn new(consume: &str, produce: &str) -> Self {
        Self {
            consume: consume.to_string(),
            produce: produce.to_string(),
        }
    }
}

/// Cross product of `consumes` (outer) and `produces` (inner).
pub fn negotiate_content(
    consumes: &[Option<String>],
    produces: &[Option<String>],
) -> Vec<ContentPair> {
    let consumes = present_or_default(consumes);
    let produces = present_or_default(produces);

    let mut pairs = Vec::with_capacity(consumes.len() * produces.len());
    for consume in &consumes {
        for produce in &produces {
            pairs.push(ContentPair::new(consume, produce));
        }
    }
    pairs
}

fn present_or_default(media: &[Option<String>]) -> Vec<&str> {
    let present: Vec<&str> = media.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        vec![DEFAULT_MEDIA_TYPE]
    } else {
        present
    }
}
