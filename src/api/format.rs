//! Normalization of operator input.
//!
//! # Responsibilities
//! - Normalize route paths (leading `/`)
//! - Escape query strings
//! - Split `key=value key2=value2` specs into ordered pairs
//!
//! # Design Decisions
//! - All functions are pure and total: no input makes them fail
//! - A pair without `=` keeps its key and gets an empty value

use url::form_urlencoded;

use crate::api::definition::KeyValue;

/// Trim the path and make sure it starts with `/`.
///
/// Returns `None` when nothing is left after trimming.
pub fn normalize_path(raw: &str) -> Option<String> {
    let path = raw.trim();
    if path.is_empty() {
        return None;
    }

    if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{}", path))
    }
}

/// Percent-encode a query string and prefix it with `?`.
///
/// When the operator already wrote a leading `?` the encoded form is returned
/// without a prefix. Empty input yields `None`.
pub fn format_query_string(raw: &str) -> Option<String> {
    let qs = raw.trim();
    if qs.is_empty() {
        return None;
    }

    let encoded: String = form_urlencoded::byte_serialize(qs.as_bytes()).collect();
    if qs.starts_with('?') {
        Some(encoded)
    } else {
        Some(format!("?{}", encoded))
    }
}

/// Split a whitespace-separated spec into pairs, each on its first `=`.
pub fn parse_pairs(spec: &str) -> Vec<KeyValue> {
    spec.split_whitespace()
        .map(|token| match token.split_once('=') {
            Some((key, value)) => KeyValue::new(key, value),
            None => KeyValue::new(token, ""),
        })
        .collect()
}

/// Render pairs back into the `key=value key2=value2` form.
pub fn format_pairs(pairs: &[KeyValue]) -> String {
    pairs
        .iter()
        .map(|kv| format!("{}={}", kv.key, kv.value))
        .collect::<Vec<_>>()
        .join(" ")
}
