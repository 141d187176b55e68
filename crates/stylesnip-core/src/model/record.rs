use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a persisted snippet record
///
/// Assigned by the store on insert and never reused, even after the record
/// is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(pub i64);

impl SnippetId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for SnippetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Persisted registry entry for one snippet of one source
///
/// Only identity, position and the enabled flag live here; descriptive
/// metadata is re-read from the snippet itself on every use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRecord {
    pub id: SnippetId,
    pub path: String,
    pub source: String,
    pub sortorder: i64,
    pub enabled: bool,
}

impl SnippetRecord {
    pub fn new(
        id: SnippetId,
        path: impl Into<String>,
        source: impl Into<String>,
        sortorder: i64,
        enabled: bool,
    ) -> Self {
        Self {
            id,
            path: path.into(),
            source: source.into(),
            sortorder,
            enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_id_display_is_bare_number() {
        assert_eq!(SnippetId(42).to_string(), "42");
    }

    #[test]
    fn test_snippet_id_display_honours_width() {
        assert_eq!(format!("{:>4}|{:<3}|", SnippetId(7), SnippetId(12)), "   7|12 |");
    }

    #[test]
    fn test_record_serializes_id_transparently() {
        let record = SnippetRecord::new(SnippetId(3), "a.scss", "builtin", 1, false);
        let value = toml::Value::try_from(&record).unwrap();
        assert_eq!(value.get("id").and_then(|v| v.as_integer()), Some(3));
    }
}
