#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Derives a filesystem-safe test file name from a path template.

use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Suffix of every generated test file.
pub const TEST_FILE_SUFFIX: &str = "-test.js";

/// File name used for the `/` path.
pub const ROOT_FILE_NAME: &str = "base-path-test.js";

/// Longest file name most filesystems accept, in bytes.
pub const MAX_FILE_NAME_LEN: usize = 255;

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]").expect("Invalid regex constant"))
}

/// Converts a path template into a test file name.
///
/// e.g. `/pets/{id}` -> `pets-id-test.js`, `/` -> `base-path-test.js`
pub fn test_file_name(path: &str) -> String {
    if path == "/" {
        return ROOT_FILE_NAME.to_string();
    }

    let joined = path
        .trim_start_matches('/')
        .trim_end_matches('/')
        .replace('/', "-");
    let sanitized = unsafe_chars().replace_all(&joined, "");
    let sanitized = sanitized.trim_start_matches('.');

    if sanitized.is_empty() {
        return ROOT_FILE_NAME.to_string();
    }
    format!("{}{}", cap_stem(sanitized, path), TEST_FILE_SUFFIX)
}

/// Truncates an over-long stem and tags it with a hash of the full path, so
/// distinct long paths keep distinct names.
fn cap_stem(stem: &str, path: &str) -> String {
    let limit = MAX_FILE_NAME_LEN - TEST_FILE_SUFFIX.len();
    if stem.len() <= limit {
        return stem.to_string();
    }

    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    let tag = format!("-{:08x}", hasher.finish() as u32);

    let mut cut = limit - tag.len();
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &stem[..cut], tag)
}
