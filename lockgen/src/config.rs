//! Optional `lockgen.toml` settings.
//!
//! ```toml
//! project = "MG100"
//! document = "./lockings.json"
//! base_path = "./custom/%PROJ%"
//! table_file_name = "locking_table"
//! ```
//!
//! Command line arguments take precedence over the file, and built-in
//! defaults apply to anything neither provides.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use lockgen_codegen::{DEFAULT_BASE_PATH, DEFAULT_TABLE_FILE_NAME, TargetPaths};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "lockgen.toml";
pub const DEFAULT_PROJECT: &str = "MG100";
pub const DEFAULT_DOCUMENT: &str = "./lockings.json";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub project: Option<String>,
    pub document: Option<PathBuf>,
    pub base_path: Option<String>,
    pub table_file_name: Option<String>,
}

impl Config {
    /// Load an explicitly requested config file, or `lockgen.toml` if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::open(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::open(Path::new(DEFAULT_CONFIG)),
            None => Ok(Self::default()),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command line overrides and defaults.
    pub fn resolve(self, project: Option<&str>, document: Option<&Path>) -> Settings {
        let project = project
            .map(str::to_string)
            .or(self.project)
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string());
        let document = document
            .map(Path::to_path_buf)
            .or(self.document)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT));
        let paths = TargetPaths::from_template(
            self.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH),
            &project,
            self.table_file_name
                .as_deref()
                .unwrap_or(DEFAULT_TABLE_FILE_NAME),
        );

        Settings {
            project,
            document,
            paths,
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project: String,
    pub document: PathBuf,
    pub paths: TargetPaths,
}

#[cfg(test)]
mod tests {
    use lockgen_codegen::Target;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Config::default().resolve(None, None);

        assert_eq!(settings.project, "MG100");
        assert_eq!(settings.document, Path::new("./lockings.json"));
        assert_eq!(
            settings.paths.file(Target::Header),
            Path::new("./custom/MG100/include/locking_table.h")
        );
    }

    #[test]
    fn test_file_values() {
        let config = Config::parse(
            r#"
            project = "BL5340"
            document = "api/lockings.json"
            base_path = "boards/%PROJ%/generated"
            table_file_name = "locks"
            "#,
        )
        .unwrap();

        let settings = config.resolve(None, None);

        assert_eq!(settings.project, "BL5340");
        assert_eq!(settings.document, Path::new("api/lockings.json"));
        assert_eq!(
            settings.paths.file(Target::Source),
            Path::new("boards/BL5340/generated/source/locks.c")
        );
    }

    #[test]
    fn test_arguments_override_file() {
        let config = Config::parse("project = \"BL5340\"\ndocument = \"a.json\"\n").unwrap();

        let settings = config.resolve(Some("MG100"), Some(Path::new("b.json")));

        assert_eq!(settings.project, "MG100");
        assert_eq!(settings.document, Path::new("b.json"));
        assert_eq!(settings.paths.base(), Path::new("./custom/MG100"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::parse("projcet = \"MG100\"\n").is_err());
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockgen.toml");
        std::fs::write(&path, "project = \"X\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.project.as_deref(), Some("X"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
