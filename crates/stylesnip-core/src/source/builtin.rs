use crate::source::preview::{find_preview, DEFAULT_PREVIEW_EXTENSIONS};
use crate::source::{SnippetHandle, SnippetSource, BUILTIN_SOURCE};
use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

/// Default location of the shipped snippets below the installation root
pub const DEFAULT_BUILTIN_SUBPATH: &str = "snippets/builtin";

/// Default URL prefix under which the builtin directory is served
pub const DEFAULT_BUILTIN_URL_BASE: &str = "/snippets/builtin";

/// Snippets shipped as files in `<installation_root>/<subpath>`
#[derive(Debug, Clone)]
pub struct BuiltinFileSource {
    id: String,
    dir: PathBuf,
    url_base: String,
    suffix: String,
    preview_extensions: Vec<String>,
}

impl BuiltinFileSource {
    /// Source over `<installation_root>/<subpath>` with default settings
    pub fn new(installation_root: impl AsRef<Path>, subpath: impl AsRef<Path>) -> Self {
        Self::with_dir(installation_root.as_ref().join(subpath))
    }

    /// Source over an explicit snippet directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            id: BUILTIN_SOURCE.to_string(),
            dir: dir.into(),
            url_base: DEFAULT_BUILTIN_URL_BASE.to_string(),
            suffix: "scss".to_string(),
            preview_extensions: DEFAULT_PREVIEW_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_url_base(mut self, url_base: impl Into<String>) -> Self {
        self.url_base = url_base.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_preview_extensions(mut self, extensions: Vec<String>) -> Self {
        self.preview_extensions = extensions;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snippet paths are bare file names; anything that could leave the
    /// directory is rejected.
    fn is_plain_file_name(path: &str) -> bool {
        let mut components = Path::new(path).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }
}

impl SnippetSource for BuiltinFileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn discover(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(
                    source = %self.id,
                    dir = %self.dir.display(),
                    error = %err,
                    "snippet directory not readable"
                );
                return Vec::new();
            }
        };

        let mut paths: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            // follows symlinks, like `resolve`
            .filter(|p| p.is_file())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == self.suffix.as_str())
                    .unwrap_or(false)
            })
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect();

        paths.sort();
        paths
    }

    fn resolve(&self, path: &str) -> Option<SnippetHandle> {
        if !Self::is_plain_file_name(path) {
            tracing::debug!(source = %self.id, path, "rejected snippet path");
            return None;
        }

        let file = self.dir.join(path);
        let readable = File::open(&file)
            .and_then(|f| f.metadata())
            .map(|m| m.is_file())
            .unwrap_or(false);

        readable.then_some(SnippetHandle::File(file))
    }

    fn preview_url(&self, path: &str) -> Option<String> {
        if !Self::is_plain_file_name(path) {
            return None;
        }
        let name = find_preview(&self.dir, path, &self.suffix, &self.preview_extensions)?;
        Some(format!("{}/{}", self.url_base.trim_end_matches('/'), name))
    }
}
