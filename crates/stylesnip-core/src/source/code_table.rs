use crate::source::{SnippetHandle, SnippetSource};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Snippets held in an in-memory `path -> content` table
///
/// Useful for snippets compiled into the host application and for tests
/// that should not touch the filesystem. Code-table snippets never have a
/// preview image.
#[derive(Debug, Clone, Default)]
pub struct CodeTableSource {
    id: String,
    entries: BTreeMap<String, Arc<str>>,
}

impl CodeTableSource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with_snippet(mut self, path: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Arc<str>>) {
        self.entries.insert(path.into(), content.into());
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }
}

impl SnippetSource for CodeTableSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn discover(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn resolve(&self, path: &str) -> Option<SnippetHandle> {
        self.entries
            .get(path)
            .map(|content| SnippetHandle::Inline(content.clone()))
    }
}
