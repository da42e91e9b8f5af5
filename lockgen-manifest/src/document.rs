use std::path::{Path, PathBuf};

use lockgen_core::Version;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    Catalog, Error, Project, Result, SourceContext,
    catalog::{self, LoadSummary},
    refs,
};

/// A loaded lock document with the `$ref`s of its lock list expanded.
#[derive(Debug, Clone)]
pub struct LockDocument {
    source: SourceContext,
    version: Version,
    root: Value,
}

impl LockDocument {
    /// Open a lock document, advancing its build number on disk.
    ///
    /// The patch component of `info.version` is incremented and the document
    /// rewritten before anything is extracted, so the bump sticks even when
    /// a later step fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();

        let bumped = bump_version_str(&content, &filename)?;
        std::fs::write(path, &bumped).map_err(|e| {
            Box::new(Error::Write {
                path: path.to_path_buf(),
                source: e,
            })
        })?;

        let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::parse(bumped, filename, base_dir)
    }

    /// Parse a document from memory without touching its version.
    ///
    /// Only references inside the lock list are followed; external ones are
    /// resolved relative to `base_dir`.
    pub fn parse(
        content: impl Into<String>,
        filename: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let source = SourceContext::new(content, filename);
        let raw: Value =
            serde_json::from_str(source.src()).map_err(|e| source.parse_error(e))?;
        let version = read_version(&raw)?;
        let base_dir: PathBuf = base_dir.into();
        let root = refs::resolve_at(&raw, &catalog::LOCKS_PATH, &base_dir)?;

        Ok(Self {
            source,
            version,
            root,
        })
    }

    /// The document version (already bumped when opened from disk).
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The document text, for error spans.
    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Build the full catalog and the locks of `project`.
    pub fn extract(&self, project: &str) -> Result<(Catalog, Project)> {
        catalog::extract(&self.root, project)
    }

    /// Informational numbers for an extracted catalog/project pair.
    pub fn summary(&self, catalog: &Catalog, project: &Project) -> LoadSummary {
        LoadSummary::new(self.version.clone(), catalog, project)
    }
}

/// Return `content` with the patch component of `info.version` incremented.
///
/// Key order is preserved and the document is pretty-printed with two-space
/// indentation; a trailing newline is kept when the input had one.
pub fn bump_version_str(content: &str, filename: &str) -> Result<String> {
    let source = SourceContext::new(content, filename);
    let mut raw: Value = serde_json::from_str(content).map_err(|e| source.parse_error(e))?;

    let current = read_version(&raw)?;
    let next = current.bump_patch().ok_or_else(|| {
        Box::new(Error::InvalidVersion {
            found: current.to_string(),
            reason: "the patch number cannot be incremented".to_string(),
        })
    })?;
    raw["info"]["version"] = serde_json::to_value(&next).map_err(|e| source.parse_error(e))?;

    let mut out = serde_json::to_string_pretty(&raw).map_err(|e| source.parse_error(e))?;
    if content.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

fn read_version(root: &Value) -> Result<Version> {
    let value = root
        .get("info")
        .and_then(|info| info.get("version"))
        .ok_or_else(|| Error::missing_field("info.version"))?;

    Version::deserialize(value).map_err(|e| {
        Box::new(Error::InvalidVersion {
            found: value.as_str().map_or_else(|| value.to_string(), str::to_string),
            reason: e.to_string(),
        })
    })
}
