use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages. Resolution-level misses (missing file, unknown source)
/// are normally expressed as `None` and only become an `ExError` when a
/// caller explicitly asks for a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    UnknownSource,
    ConstraintViolation,

    // Configuration
    Config,

    // Integration/IO
    Io,
    Persistence,
    Concurrency,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::UnknownSource => "ERR_UNKNOWN_SOURCE",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus snippet context
/// (record id, source, path) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    snippet_id: Option<i64>,
    source_id: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            snippet_id: None,
            source_id: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add snippet record id context
    pub fn with_snippet_id(mut self, id: i64) -> Self {
        self.snippet_id = Some(id);
        self
    }

    /// Add snippet source context
    pub fn with_source_id(mut self, source: impl Into<String>) -> Self {
        self.source_id = Some(source.into());
        self
    }

    /// Add snippet path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the snippet record id, if any
    pub fn snippet_id(&self) -> Option<i64> {
        self.snippet_id
    }

    /// Get the snippet source, if any
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    /// Get the snippet path, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(id) = self.snippet_id {
            write!(f, " (snippet_id: {})", id)?;
        }
        if let Some(source) = &self.source_id {
            write!(f, " (source: {})", source)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(inner) = &self.source {
            write!(f, " <- {}", inner)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the snippet registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnippetError {
    /// No persisted record carries this id
    #[error("Snippet not found: {snippet_id}")]
    SnippetNotFound { snippet_id: i64 },

    /// No resolver is registered for this source id
    #[error("Unknown snippet source: {source_id}")]
    UnknownSource { source_id: String },

    /// The source could not produce a readable snippet at this path
    #[error("Snippet {source_id}/{path} is not readable")]
    SnippetUnreadable { source_id: String, path: String },

    /// The snippet is readable but its header declares no title
    #[error("Snippet {source_id}/{path} has no title")]
    MissingTitle { source_id: String, path: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// Filesystem failure outside of plain snippet resolution
    #[error("I/O error during {operation}: {message}")]
    Io { operation: String, message: String },
}

impl From<SnippetError> for ExError {
    fn from(err: SnippetError) -> Self {
        match err {
            SnippetError::SnippetNotFound { snippet_id } => ExError::new(ExErrorKind::NotFound)
                .with_snippet_id(snippet_id)
                .with_message("Snippet not found"),

            SnippetError::UnknownSource { source_id } => {
                ExError::new(ExErrorKind::UnknownSource)
                    .with_source_id(source_id)
                    .with_message("No resolver registered for source")
            }

            SnippetError::SnippetUnreadable { source_id, path } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_source_id(source_id)
                    .with_path(path)
                    .with_message("Snippet is not readable")
            }

            SnippetError::MissingTitle { source_id, path } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_source_id(source_id)
                    .with_path(path)
                    .with_message("Snippet header declares no title")
            }

            SnippetError::Config { reason } => {
                ExError::new(ExErrorKind::Config).with_message(reason)
            }

            SnippetError::Io { operation, message } => ExError::new(ExErrorKind::Io)
                .with_op(operation)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::UnknownSource, "ERR_UNKNOWN_SOURCE"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::Config, "ERR_CONFIG"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_snippet_not_found_converts_with_id() {
        let err: ExError = SnippetError::SnippetNotFound { snippet_id: 7 }.into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.snippet_id(), Some(7));
    }

    #[test]
    fn test_snippet_errors_carry_source_and_path() {
        let cases = [
            (
                SnippetError::UnknownSource { source_id: "theme".into() },
                ExErrorKind::UnknownSource,
                None,
            ),
            (
                SnippetError::SnippetUnreadable { source_id: "builtin".into(), path: "a.scss".into() },
                ExErrorKind::NotFound,
                Some("a.scss"),
            ),
            (
                SnippetError::MissingTitle { source_id: "builtin".into(), path: "b.scss".into() },
                ExErrorKind::InvalidInput,
                Some("b.scss"),
            ),
        ];
        for (domain, kind, path) in cases {
            let err: ExError = domain.into();
            assert_eq!(err.kind(), kind);
            assert!(err.source_id().is_some());
            assert_eq!(err.path(), path);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("move_up")
            .with_snippet_id(3)
            .with_message("database is locked");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_PERSISTENCE]"));
        assert!(text.contains("move_up"));
        assert!(text.contains("snippet_id: 3"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
