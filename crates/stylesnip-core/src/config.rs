//! Registry configuration
//!
//! Loaded from TOML. Resolution order for the file:
//! 1. Explicit path (command-line `--config`)
//! 2. `STYLESNIP_CONFIG` environment variable
//! 3. `stylesnip.toml` in the working directory, if present
//! 4. Compiled defaults
//!
//! `STYLESNIP_ROOT` overrides `installation_root` from any of the above.

use crate::collaborators::{
    CacheInvalidator, FileCacheInvalidator, NoopCacheInvalidator, StaticFeatureToggles,
};
use crate::errors::{Result, SnippetError};
use crate::header::HeaderFieldSet;
use crate::source::builtin::{DEFAULT_BUILTIN_SUBPATH, DEFAULT_BUILTIN_URL_BASE};
use crate::source::preview::DEFAULT_PREVIEW_EXTENSIONS;
use crate::source::{BuiltinFileSource, SourceRegistry, BUILTIN_SOURCE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "STYLESNIP_CONFIG";
pub const ROOT_ENV: &str = "STYLESNIP_ROOT";
pub const DEFAULT_CONFIG_FILE: &str = "stylesnip.toml";
pub const DEFAULT_DATABASE_PATH: &str = ".stylesnip/registry.db";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Root of the host installation; the builtin directory lives below it
    pub installation_root: PathBuf,
    /// Builtin snippet directory, relative to `installation_root`
    pub builtin_subpath: PathBuf,
    /// URL prefix under which the builtin directory is served
    pub builtin_url_base: String,
    pub database_path: PathBuf,
    /// Sources whose snippets may be composed
    pub enabled_sources: Vec<String>,
    pub header_fields: HeaderFieldSet,
    /// Preview image extensions, highest priority first
    pub preview_extensions: Vec<String>,
    /// Compiled stylesheet to delete whenever the selection changes
    pub compiled_cache_path: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            installation_root: PathBuf::from("."),
            builtin_subpath: PathBuf::from(DEFAULT_BUILTIN_SUBPATH),
            builtin_url_base: DEFAULT_BUILTIN_URL_BASE.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            enabled_sources: vec![BUILTIN_SOURCE.to_string()],
            header_fields: HeaderFieldSet::default(),
            preview_extensions: DEFAULT_PREVIEW_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            compiled_cache_path: None,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RegistryConfig = toml::from_str(content).map_err(|e| SnippetError::Config {
            reason: format!("TOML parse error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SnippetError::Io {
            operation: format!("read config {}", path.display()),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve configuration from the command line and the process environment
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let env_root = std::env::var_os(ROOT_ENV).map(PathBuf::from);
        Self::resolve_with(cli_path, env_path.as_deref(), env_root, Path::new("."))
    }

    /// `resolve` with the environment passed in explicitly
    ///
    /// An explicitly named file (flag or env var) must exist; the default
    /// file in `cwd` is optional.
    pub fn resolve_with(
        cli_path: Option<&Path>,
        env_path: Option<&Path>,
        env_root: Option<PathBuf>,
        cwd: &Path,
    ) -> Result<Self> {
        let mut config = match cli_path.or(env_path) {
            Some(path) => Self::load_file(path)?,
            None => {
                let default_file = cwd.join(DEFAULT_CONFIG_FILE);
                if default_file.is_file() {
                    Self::load_file(&default_file)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(root) = env_root {
            config.installation_root = root;
        }
        Ok(config)
    }

    /// Check values that TOML typing alone can't rule out
    pub fn validate(&self) -> Result<()> {
        if self.builtin_subpath.is_absolute() {
            return Err(SnippetError::Config {
                reason: format!(
                    "builtin_subpath must be relative, got {}",
                    self.builtin_subpath.display()
                ),
            }
            .into());
        }

        for ext in &self.preview_extensions {
            let valid = !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric());
            if !valid {
                return Err(SnippetError::Config {
                    reason: format!("invalid preview extension '{}'", ext),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn builtin_dir(&self) -> PathBuf {
        self.installation_root.join(&self.builtin_subpath)
    }

    /// Source registry with the builtin file source configured
    pub fn build_sources(&self) -> SourceRegistry {
        SourceRegistry::new(self.header_fields).with_source(
            BuiltinFileSource::with_dir(self.builtin_dir())
                .with_url_base(self.builtin_url_base.clone())
                .with_preview_extensions(self.preview_extensions.clone()),
        )
    }

    pub fn feature_toggles(&self) -> StaticFeatureToggles {
        StaticFeatureToggles::new(self.enabled_sources.iter().cloned())
    }

    pub fn cache_invalidator(&self) -> Box<dyn CacheInvalidator> {
        match &self.compiled_cache_path {
            Some(path) => Box::new(FileCacheInvalidator::new(path)),
            None => Box::new(NoopCacheInvalidator),
        }
    }
}
