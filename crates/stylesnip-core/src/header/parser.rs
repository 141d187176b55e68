//! Header field extraction
//!
//! Each field must sit on its own line and cannot span lines. Metadata beyond
//! the byte window is never seen; authors are expected to keep the header at
//! the top of the file.

use crate::header::fields::{HeaderField, HeaderFieldSet, HeaderValues};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Number of leading bytes inspected for header fields
pub const HEADER_WINDOW_BYTES: usize = 8192;

const ALL_FIELDS: &[HeaderField] = &[
    HeaderField::Title,
    HeaderField::Goal,
    HeaderField::Description,
    HeaderField::Scope,
    HeaderField::Creator,
    HeaderField::UsageNote,
];

fn field_patterns() -> &'static BTreeMap<HeaderField, Regex> {
    static PATTERNS: OnceLock<BTreeMap<HeaderField, Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ALL_FIELDS
            .iter()
            .filter_map(|field| {
                let pattern = format!(
                    r"(?mi)^[ \t]*[ \t/*#@]*{}:(.*)$",
                    regex::escape(field.label())
                );
                Regex::new(&pattern).ok().map(|re| (*field, re))
            })
            .collect()
    })
}

fn comment_close() -> Option<&'static Regex> {
    static CLOSE: OnceLock<Option<Regex>> = OnceLock::new();
    CLOSE
        .get_or_init(|| Regex::new(r"\s*(?:\*/|\?>).*").ok())
        .as_ref()
}

/// Restrict `bytes` to the header window
pub fn header_window(bytes: &[u8]) -> &[u8] {
    &bytes[..bytes.len().min(HEADER_WINDOW_BYTES)]
}

/// Drop a trailing close-comment (`*/`) or close-tag (`?>`) and everything
/// after it, then trim
fn cleanup_header_comment(value: &str) -> String {
    match comment_close() {
        Some(re) => re.replace(value, "").trim().to_string(),
        None => value.trim().to_string(),
    }
}

/// Extract the fields of `set` from the leading window of `bytes`
///
/// The returned values always hold an entry for every field of the set;
/// fields that are missing or empty map to `""`. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn parse_header(bytes: &[u8], set: HeaderFieldSet) -> HeaderValues {
    let text = String::from_utf8_lossy(header_window(bytes)).replace('\r', "\n");
    let patterns = field_patterns();

    let mut values = HeaderValues::empty(set);
    for field in set.fields() {
        let captured = patterns
            .get(field)
            .and_then(|re| re.captures(&text))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|raw| !raw.is_empty());

        if let Some(raw) = captured {
            values.insert(*field, cleanup_header_comment(raw));
        }
    }
    values
}
