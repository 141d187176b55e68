//! Snippet sources
//!
//! A source turns the `path` of a persisted record into something readable.
//! Sources are keyed by the record's `source` discriminator and collected in
//! a [`SourceRegistry`]; callers never branch on source ids themselves.

pub mod builtin;
pub mod code_table;
pub mod preview;
pub mod registry;

pub use builtin::BuiltinFileSource;
pub use code_table::CodeTableSource;
pub use registry::SourceRegistry;

use crate::header::HEADER_WINDOW_BYTES;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Source id of the snippets shipped in the installation directory
pub const BUILTIN_SOURCE: &str = "builtin";

/// A resolved, readable snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetHandle {
    /// Snippet backed by a file on disk
    File(PathBuf),
    /// Snippet held in memory
    Inline(Arc<str>),
}

impl SnippetHandle {
    /// Leading bytes of the snippet, at most `HEADER_WINDOW_BYTES`
    ///
    /// Returns `None` if the backing file can no longer be read.
    pub fn read_header_window(&self) -> Option<Vec<u8>> {
        match self {
            SnippetHandle::File(path) => {
                let file = File::open(path).ok()?;
                let mut buf = Vec::with_capacity(HEADER_WINDOW_BYTES);
                file.take(HEADER_WINDOW_BYTES as u64)
                    .read_to_end(&mut buf)
                    .ok()?;
                Some(buf)
            }
            SnippetHandle::Inline(content) => {
                let bytes = content.as_bytes();
                Some(bytes[..bytes.len().min(HEADER_WINDOW_BYTES)].to_vec())
            }
        }
    }

    /// Full snippet text, header comment included
    ///
    /// Snippet files must be UTF-8. Content is passed through unchanged when
    /// it is; otherwise invalid sequences are replaced with U+FFFD and the
    /// replacement is logged at debug level. Returns `None` if the backing
    /// file can no longer be read.
    pub fn read_content(&self) -> Option<String> {
        match self {
            SnippetHandle::File(path) => {
                let bytes = std::fs::read(path).ok()?;
                match String::from_utf8(bytes) {
                    Ok(text) => Some(text),
                    Err(err) => {
                        tracing::debug!(
                            path = %path.display(),
                            valid_up_to = err.utf8_error().valid_up_to(),
                            "snippet is not UTF-8; invalid bytes replaced"
                        );
                        Some(String::from_utf8_lossy(err.as_bytes()).into_owned())
                    }
                }
            }
            SnippetHandle::Inline(content) => Some(content.to_string()),
        }
    }
}

/// Provider of snippets for one source id
pub trait SnippetSource: Send + Sync {
    /// Discriminator stored in the `source` column of records
    fn id(&self) -> &str;

    /// Paths currently available from this source, in ascending order
    fn discover(&self) -> Vec<String>;

    /// Resolve `path` to a readable handle
    ///
    /// Missing, unreadable and rejected paths all yield `None`.
    fn resolve(&self, path: &str) -> Option<SnippetHandle>;

    /// Servable URL of the snippet's preview image, if it has one
    fn preview_url(&self, _path: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_utf8_content_is_returned_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("accents.scss");
        let text = "/* Snippet Title: Café */\n.a::before { content: \"→\"; }\n";
        std::fs::write(&file, text).unwrap();

        let content = SnippetHandle::File(file).read_content().unwrap();

        assert_eq!(content.as_bytes(), text.as_bytes());
    }

    #[test]
    fn test_non_utf8_bytes_are_replaced() {
        // Given: A Latin-1 encoded snippet ("Café" with a single 0xE9 byte)
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("latin1.scss");
        std::fs::write(&file, b"/* Snippet Title: Caf\xe9 */\n").unwrap();

        // When: Reading it for composition
        let content = SnippetHandle::File(file).read_content().unwrap();

        // Then: The invalid byte becomes U+FFFD and the rest is untouched
        assert_eq!(content, "/* Snippet Title: Caf\u{FFFD} */\n");
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let handle = SnippetHandle::File(PathBuf::from("/nonexistent/stylesnip/a.scss"));
        assert!(handle.read_content().is_none());
        assert!(handle.read_header_window().is_none());
    }
}
