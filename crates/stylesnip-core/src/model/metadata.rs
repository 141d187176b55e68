use crate::model::SnippetRecord;
use serde::Serialize;

/// Descriptive metadata parsed from a snippet's header comment
///
/// `title` is always non-empty: a snippet without a title never produces a
/// `SnippetMetadata` at all. Every other text field falls back to `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetMetadata {
    pub title: String,
    pub description: String,
    pub scope: String,
    pub goal: String,
    pub creator: String,
    pub usage_note: String,
    pub source: String,
    pub preview_url: Option<String>,
}

/// A persisted record joined with its live metadata, for display and
/// composition only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedSnippet {
    #[serde(flatten)]
    pub record: SnippetRecord,
    pub meta: SnippetMetadata,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

impl ComposedSnippet {
    pub fn title(&self) -> &str {
        &self.meta.title
    }
}
