use std::{fmt, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for lockgen-manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the document text and filename so validation errors can
/// point at the offending declaration.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "lockings.json");
/// let span = ctx.find_name("adc");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a serde_json error.
    pub fn parse_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Find the `"name": "<name>"` member of a declaration.
    pub fn find_name(&self, name: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", name);
        let pattern = format!("\"name\": {}", quoted);
        if let Some(pos) = self.src.find(&pattern) {
            // skip to the value
            let start = pos + pattern.len() - quoted.len();
            return Some(SourceSpan::from((start, quoted.len())));
        }

        // Fallback: the quoted name anywhere (less precise)
        self.src
            .find(&quoted)
            .map(|pos| SourceSpan::from((pos, quoted.len())))
    }

    /// Find an `"x-id": <id>` member with exactly this id.
    pub fn find_id(&self, id: u32) -> Option<SourceSpan> {
        let pattern = format!("\"x-id\": {}", id);
        let mut from = 0;
        while let Some(found) = self.src[from..].find(&pattern) {
            let start = from + found;
            let end = start + pattern.len();
            let next = self.src[end..].chars().next();
            if !next.is_some_and(|c| c.is_ascii_digit() || c == '.') {
                return Some(SourceSpan::from((start, pattern.len())));
            }
            from = end;
        }
        None
    }
}

/// Byte offset of a 1-based line/column position.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset < src.len()).then_some(offset)
}

/// Which list a uniqueness check ran over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The locks assigned to the active project.
    Project,
    /// Every lock in the document, across all projects.
    Api,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Project => write!(f, "project"),
            Scope::Api => write!(f, "API"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(lockgen::io), help("pass the lock document path as the second argument"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(lockgen::io))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lock document")]
    #[diagnostic(code(lockgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing field '{path}'")]
    #[diagnostic(code(lockgen::missing_field))]
    MissingField { path: String },

    #[error("invalid document version '{found}'")]
    #[diagnostic(
        code(lockgen::invalid_version),
        help("{reason}; `info.version` must look like \"1.0.42\"")
    )]
    InvalidVersion { found: String, reason: String },

    #[error("invalid lock declaration #{index}")]
    #[diagnostic(code(lockgen::invalid_declaration), help("{reason}"))]
    InvalidDeclaration { index: usize, reason: String },

    #[error("cannot resolve reference '{reference}'")]
    #[diagnostic(code(lockgen::reference), help("{reason}"))]
    Reference { reference: String, reason: String },

    #[error("duplicate lock id in {scope}")]
    #[diagnostic(
        code(lockgen::duplicate_id),
        help("every lock needs its own x-id; duplicated: {duplicates}")
    )]
    DuplicateId {
        #[source_code]
        src: NamedSource<String>,
        #[label("duplicated id")]
        span: Option<SourceSpan>,
        scope: Scope,
        duplicates: String,
    },

    #[error("duplicate lock name in {scope}")]
    #[diagnostic(
        code(lockgen::duplicate_name),
        help("every lock needs its own name; duplicated: {duplicates}")
    )]
    DuplicateName {
        #[source_code]
        src: NamedSource<String>,
        #[label("duplicated name")]
        span: Option<SourceSpan>,
        scope: Scope,
        duplicates: String,
    },

    #[error("lock '{name}' has unknown type '{kind}'")]
    #[diagnostic(
        code(lockgen::unknown_kind),
        help("schema.type must be \"mutex\" or \"semaphore\"")
    )]
    UnknownKind {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        name: String,
        kind: String,
    },

    #[error("semaphore limit must be >= 1: {name} with limit {limit}")]
    #[diagnostic(code(lockgen::semaphore_limit))]
    SemaphoreLimit {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        name: String,
        limit: i64,
    },

    #[error(
        "semaphore count must be less than or equal to limit: {name} with count {count} and limit {limit}"
    )]
    #[diagnostic(code(lockgen::semaphore_count))]
    SemaphoreCount {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        name: String,
        count: i64,
        limit: i64,
    },
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(path: impl Into<String>) -> Box<Self> {
        Box::new(Error::MissingField { path: path.into() })
    }

    /// Create an invalid declaration error
    pub fn invalid_declaration(index: usize, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidDeclaration {
            index,
            reason: reason.into(),
        })
    }

    /// Create an unresolvable reference error
    pub fn reference(reference: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::Reference {
            reference: reference.into(),
            reason: reason.into(),
        })
    }
}
