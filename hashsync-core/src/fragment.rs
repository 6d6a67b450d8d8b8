//! URL fragment encoding for param sets
//!
//! The layout is `key1=value1;key2=value2;` with every entry terminated by
//! `;`. Nothing is escaped: a key or value containing `=` or `;` produces a
//! fragment that will not decode back to the same set.

use crate::param_set::ParamSet;

pub const FRAGMENT_MARKER: char = '#';
pub const ENTRY_DELIMITER: char = ';';
pub const KV_SEPARATOR: char = '=';

/// Encode a param set as fragment body (no leading `#`).
///
/// An entry without a value is written as a bare `key;`.
pub fn encode(params: &ParamSet) -> String {
    let mut out = String::new();
    for (key, value) in params.iter() {
        out.push_str(key);
        if let Some(value) = value {
            out.push(KV_SEPARATOR);
            out.push_str(value);
        }
        out.push(ENTRY_DELIMITER);
    }
    out
}

/// Decode a fragment, with or without its leading `#`.
///
/// Empty segments are skipped. Each segment is split on its first `=`; a
/// segment with no `=` becomes a key with a missing value. Later duplicates win.
pub fn decode(fragment: &str) -> ParamSet {
    let body = strip_marker(fragment);
    let mut params = ParamSet::new();
    for segment in body.split(ENTRY_DELIMITER) {
        if segment.is_empty() {
            continue;
        }
        match segment.split_once(KV_SEPARATOR) {
            Some((key, value)) => {
                params.insert(key, value);
            }
            None => params.insert_missing(segment),
        }
    }
    params
}

/// Drop one leading `#` if present.
pub fn strip_marker(fragment: &str) -> &str {
    fragment.strip_prefix(FRAGMENT_MARKER).unwrap_or(fragment)
}
