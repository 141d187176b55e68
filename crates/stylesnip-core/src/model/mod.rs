//! Domain model for the snippet registry

pub mod metadata;
pub mod record;

pub use metadata::{ComposedSnippet, SnippetMetadata};
pub use record::{SnippetId, SnippetRecord};
