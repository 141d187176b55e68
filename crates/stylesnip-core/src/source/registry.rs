use crate::errors::{Result, SnippetError};
use crate::header::{parse_header, HeaderField, HeaderFieldSet, HeaderValues};
use crate::model::SnippetMetadata;
use crate::source::{SnippetHandle, SnippetSource};
use std::collections::BTreeMap;

/// All snippet sources known to the application, keyed by source id
///
/// Lookups degrade to an empty result when the source is unknown or the
/// snippet cannot be read. `require_snippet_meta` is the one exception.
pub struct SourceRegistry {
    sources: BTreeMap<String, Box<dyn SnippetSource>>,
    fields: HeaderFieldSet,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(HeaderFieldSet::default())
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .field("fields", &self.fields)
            .finish()
    }
}

impl SourceRegistry {
    pub fn new(fields: HeaderFieldSet) -> Self {
        Self {
            sources: BTreeMap::new(),
            fields,
        }
    }

    /// Register a source under its own id, replacing any previous one
    pub fn register(&mut self, source: impl SnippetSource + 'static) {
        self.sources
            .insert(source.id().to_string(), Box::new(source));
    }

    /// Builder-style `register`
    pub fn with_source(mut self, source: impl SnippetSource + 'static) -> Self {
        self.register(source);
        self
    }

    pub fn fields(&self) -> HeaderFieldSet {
        self.fields
    }

    /// Registered source ids in ascending order
    pub fn source_ids(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn contains(&self, source: &str) -> bool {
        self.sources.contains_key(source)
    }

    pub fn get(&self, source: &str) -> Option<&dyn SnippetSource> {
        self.sources.get(source).map(|s| s.as_ref())
    }

    /// Paths currently present for `source`; empty for unknown sources
    pub fn discover(&self, source: &str) -> Vec<String> {
        self.get(source).map(|s| s.discover()).unwrap_or_default()
    }

    /// Resolve a record's `(path, source)` to a readable handle
    pub fn resolve(&self, path: &str, source: &str) -> Option<SnippetHandle> {
        let resolved = self.get(source).and_then(|s| s.resolve(path));
        if resolved.is_none() {
            tracing::debug!(source, path, "snippet not resolvable");
        }
        resolved
    }

    fn header_values(&self, path: &str, source: &str) -> Option<HeaderValues> {
        let bytes = self.resolve(path, source)?.read_header_window()?;
        Some(parse_header(&bytes, self.fields))
    }

    /// Metadata of a snippet, or `None` if it cannot be read or has no title
    pub fn get_snippet_meta(&self, path: &str, source: &str) -> Option<SnippetMetadata> {
        let values = self.header_values(path, source)?;
        let meta = self.metadata_from(&values, path, source);
        if meta.is_none() {
            tracing::debug!(source, path, "snippet header has no title");
        }
        meta
    }

    /// Like `get_snippet_meta`, but says why there is no metadata
    ///
    /// # Errors
    ///
    /// `UnknownSource` if no source is registered under `source`,
    /// `NotFound` if the snippet cannot be read, `InvalidInput` if its
    /// header has no title.
    pub fn require_snippet_meta(&self, path: &str, source: &str) -> Result<SnippetMetadata> {
        if !self.contains(source) {
            return Err(SnippetError::UnknownSource {
                source_id: source.to_string(),
            }
            .into());
        }
        let values = self.header_values(path, source).ok_or_else(|| {
            SnippetError::SnippetUnreadable {
                source_id: source.to_string(),
                path: path.to_string(),
            }
        })?;
        self.metadata_from(&values, path, source).ok_or_else(|| {
            SnippetError::MissingTitle {
                source_id: source.to_string(),
                path: path.to_string(),
            }
            .into()
        })
    }

    fn metadata_from(
        &self,
        values: &HeaderValues,
        path: &str,
        source: &str,
    ) -> Option<SnippetMetadata> {
        let title = values.get(HeaderField::Title);
        if title.is_empty() {
            return None;
        }

        Some(SnippetMetadata {
            title: title.to_string(),
            description: values.get(HeaderField::Description).to_string(),
            scope: values.get(HeaderField::Scope).to_string(),
            goal: values.get(HeaderField::Goal).to_string(),
            creator: values.get(HeaderField::Creator).to_string(),
            usage_note: values.get(HeaderField::UsageNote).to_string(),
            source: source.to_string(),
            preview_url: self.preview_url(path, source),
        })
    }

    /// Full snippet text, or `""` if it cannot be read
    pub fn get_snippet_content(&self, path: &str, source: &str) -> String {
        self.resolve(path, source)
            .and_then(|handle| handle.read_content())
            .unwrap_or_default()
    }

    pub fn preview_url(&self, path: &str, source: &str) -> Option<String> {
        self.get(source).and_then(|s| s.preview_url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::source::CodeTableSource;

    fn registry() -> SourceRegistry {
        SourceRegistry::default().with_source(
            CodeTableSource::new("code")
                .with_snippet("titled", "/*\n * Snippet Title: Titled\n * Scope: global\n */\na{}")
                .with_snippet("untitled", "/*\n * Scope: global\n */\nb{}"),
        )
    }

    #[test]
    fn test_unknown_source_resolves_to_none() {
        let registry = registry();
        assert!(registry.resolve("titled", "elsewhere").is_none());
        assert!(registry.get_snippet_meta("titled", "elsewhere").is_none());
        assert_eq!(registry.get_snippet_content("titled", "elsewhere"), "");
        assert!(registry.discover("elsewhere").is_empty());
    }

    #[test]
    fn test_missing_title_yields_none() {
        let registry = registry();
        assert!(registry.get_snippet_meta("untitled", "code").is_none());
        // The content itself is still readable.
        assert!(registry
            .get_snippet_content("untitled", "code")
            .ends_with("b{}"));
    }

    #[test]
    fn test_meta_defaults_optional_fields() {
        let meta = registry().get_snippet_meta("titled", "code").unwrap();
        assert_eq!(meta.title, "Titled");
        assert_eq!(meta.scope, "global");
        assert_eq!(meta.goal, "");
        assert_eq!(meta.description, "");
        assert_eq!(meta.creator, "");
        assert_eq!(meta.source, "code");
        assert!(meta.preview_url.is_none());
    }

    #[test]
    fn test_require_meta_tells_failures_apart() {
        let registry = registry();

        let unknown = registry.require_snippet_meta("titled", "elsewhere").unwrap_err();
        assert_eq!(unknown.kind(), ExErrorKind::UnknownSource);
        assert_eq!(unknown.source_id(), Some("elsewhere"));

        let missing = registry.require_snippet_meta("nope", "code").unwrap_err();
        assert_eq!(missing.kind(), ExErrorKind::NotFound);
        assert_eq!(missing.path(), Some("nope"));

        let untitled = registry.require_snippet_meta("untitled", "code").unwrap_err();
        assert_eq!(untitled.kind(), ExErrorKind::InvalidInput);
        assert_eq!(untitled.code(), "ERR_INVALID_INPUT");
    }

    #[test]
    fn test_require_meta_matches_lenient_lookup() {
        let registry = registry();
        assert_eq!(
            registry.require_snippet_meta("titled", "code").ok(),
            registry.get_snippet_meta("titled", "code")
        );
    }
}
