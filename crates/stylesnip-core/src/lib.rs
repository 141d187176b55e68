//! Stylesnip Core - snippet model, header parsing and source resolution
//!
//! This crate provides everything the registry needs that does not touch the
//! database:
//! - Structured error facility and logging facility
//! - Snippet records, metadata and their display join
//! - Header parser for `Label: value` comment blocks
//! - Pluggable snippet sources (builtin directory, in-memory code table)
//! - Collaborator traits for feature toggles and cache invalidation
//! - TOML configuration

pub mod collaborators;
pub mod config;
pub mod errors;
pub mod header;
pub mod logging_facility;
pub mod model;
pub mod source;

// Re-export commonly used types
pub use collaborators::{CacheInvalidator, FeatureToggles, StaticFeatureToggles};
pub use config::RegistryConfig;
pub use errors::{ExError, ExErrorKind, Result, SnippetError};
pub use model::{ComposedSnippet, SnippetId, SnippetMetadata, SnippetRecord};
pub use source::{SnippetSource, SourceRegistry, BUILTIN_SOURCE};
