//! Interfaces to the host application
//!
//! The registry needs two things from its host: which sources are currently
//! switched on, and a way to drop any compiled output built from an older
//! snippet selection. Both are injected into the operations that need them.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Feature-toggle store deciding which sources may contribute to composition
pub trait FeatureToggles {
    /// Source ids whose snippets may be composed; may be empty
    fn enabled_sources(&self) -> BTreeSet<String>;
}

/// Fixed set of enabled sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFeatureToggles {
    sources: BTreeSet<String>,
}

impl StaticFeatureToggles {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    /// No source enabled; composition yields nothing
    pub fn none() -> Self {
        Self::default()
    }
}

impl FeatureToggles for StaticFeatureToggles {
    fn enabled_sources(&self) -> BTreeSet<String> {
        self.sources.clone()
    }
}

/// Owner of the compiled style output cache
pub trait CacheInvalidator {
    /// Discard any compiled output; the next build recomposes from scratch
    fn invalidate_compiled_output(&self);
}

/// Invalidator for hosts without a compiled-output cache
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheInvalidator;

impl CacheInvalidator for NoopCacheInvalidator {
    fn invalidate_compiled_output(&self) {}
}

/// Invalidator that counts calls
#[derive(Debug, Default)]
pub struct CountingCacheInvalidator {
    calls: AtomicUsize,
}

impl CountingCacheInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CacheInvalidator for CountingCacheInvalidator {
    fn invalidate_compiled_output(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Invalidator for a compiled stylesheet cached as a single file
///
/// Invalidation deletes the file. A file that is already gone counts as
/// invalidated; other failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct FileCacheInvalidator {
    path: PathBuf,
}

impl FileCacheInvalidator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CacheInvalidator for FileCacheInvalidator {
    fn invalidate_compiled_output(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "compiled output removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "could not remove compiled output"
            ),
        }
    }
}
