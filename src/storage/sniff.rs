//! Shallow "is this a JSON object" check
//!
//! Only looks at the outer braces. Malformed JSON wrapped in `{}` passes,
//! and valid JSON with a non-object top level (e.g. an array) is rejected,
//! since every data file is expected to hold an object.

use std::path::Path;
use tracing::debug;

use super::fs::strip_bom;

/// True if the trimmed text (byte-order mark ignored) starts with `{` and ends with `}`
pub fn text_looks_like_json_object(text: &str) -> bool {
    let text = strip_bom(text).trim();
    text.starts_with('{') && text.ends_with('}')
}

/// True if the file exists and its content looks like a JSON object
pub fn looks_like_json_object(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    match std::fs::read_to_string(path) {
        Ok(text) => text_looks_like_json_object(&text),
        Err(e) => {
            debug!("Could not read {:?} for sniffing: {}", path, e);
            false
        }
    }
}
