//! Header comparison (case-insensitive names).

use crate::types::procedure::Headers;
use std::collections::HashMap;

/// Lowercase names, merging the values of names that differ only in case.
///
/// Merged lists follow the original names in sorted order.
fn normalize_headers(headers: Option<&Headers>) -> HashMap<String, Vec<&str>> {
    let Some(headers) = headers else {
        return HashMap::new();
    };

    let mut names: Vec<&String> = headers.keys().collect();
    names.sort();

    let mut normalized: HashMap<String, Vec<&str>> = HashMap::new();
    for name in names {
        let values = &headers[name];
        if values.is_empty() {
            continue;
        }
        normalized
            .entry(name.to_lowercase())
            .or_default()
            .extend(values.iter().map(String::as_str));
    }
    normalized
}

/// Compare two header mappings.
///
/// Names compare case-insensitively and a missing mapping equals an empty one,
/// so "no custom headers" matches whatever representation the other side uses.
pub fn headers_equal(left: Option<&Headers>, right: Option<&Headers>) -> bool {
    normalize_headers(left) == normalize_headers(right)
}

/// Check that every expected header is present in `actual` with the same values.
pub fn headers_include(actual: Option<&Headers>, expected: Option<&Headers>) -> bool {
    let expected = normalize_headers(expected);
    if expected.is_empty() {
        return true;
    }

    let actual = normalize_headers(actual);
    expected.iter().all(|(k, v)| actual.get(k) == Some(v))
}
