//! Lock catalog and project extraction.

use lockgen_core::{LockKind, Version};
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Path of the lock declarations inside the document.
pub const LOCKS_PATH: [&str; 4] = [
    "components",
    "contentDescriptors",
    "deviceParams",
    "x-device-locks",
];

/// One declaration as seen by the whole API, regardless of project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
}

/// Every declared lock, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Ids in `[0, len)` that no declaration uses, ascending.
    pub fn available_ids(&self) -> Vec<u32> {
        let len = u32::try_from(self.len()).unwrap_or(u32::MAX);
        (0..len).filter(|id| !self.contains_id(*id)).collect()
    }
}

/// A lock assigned to the active project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lock {
    pub id: u32,
    pub name: String,
    pub kind: LockKind,
    pub count: i64,
    pub limit: i64,
}

impl Lock {
    pub fn mutex(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: LockKind::Mutex,
            count: 0,
            limit: 0,
        }
    }

    pub fn semaphore(id: u32, name: impl Into<String>, count: i64, limit: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind: LockKind::Semaphore,
            count,
            limit,
        }
    }
}

/// The locks of one project, in declaration order.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    locks: Vec<Lock>,
}

impl Project {
    pub fn new(name: impl Into<String>, locks: Vec<Lock>) -> Self {
        Self {
            name: name.into(),
            locks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locks(&self) -> &[Lock] {
        &self.locks
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Largest project id, `None` when the project has no locks.
    pub fn max_id(&self) -> Option<u32> {
        self.locks.iter().map(|l| l.id).max()
    }

    /// Length of the longest lock name, `None` when empty.
    pub fn longest_name(&self) -> Option<usize> {
        self.locks.iter().map(|l| l.name.len()).max()
    }
}

/// Informational numbers printed after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub version: Version,
    pub project: String,
    pub catalog_size: usize,
    pub project_locks: usize,
    pub max_id: Option<u32>,
    pub available_ids: Vec<u32>,
}

impl LoadSummary {
    pub fn new(version: Version, catalog: &Catalog, project: &Project) -> Self {
        Self {
            version,
            project: project.name().to_string(),
            catalog_size: catalog.len(),
            project_locks: project.len(),
            max_id: project.max_id(),
            available_ids: catalog.available_ids(),
        }
    }
}

/// A number that may be absent from the declaration.
///
/// Declared numbers may be fractional; they are truncated toward zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(transparent)]
pub struct OptionalNumber(Option<f64>);

impl OptionalNumber {
    /// The declared value truncated to an integer, or 0 when absent.
    pub fn or_zero(self) -> i64 {
        self.0.map_or(0, |n| n.trunc() as i64)
    }
}

#[derive(Debug, Deserialize)]
struct Declaration {
    name: String,
    #[serde(rename = "x-id")]
    id: u32,
    #[serde(rename = "x-projects", default)]
    projects: Vec<String>,
    #[serde(default)]
    schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DeclaredSchema {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    count: OptionalNumber,
    #[serde(default)]
    limit: OptionalNumber,
}

/// Split the declarations in `root` into the full catalog and `project`'s locks.
pub(crate) fn extract(root: &Value, project: &str) -> Result<(Catalog, Project)> {
    let declarations = declarations(root)?;

    let mut entries = Vec::with_capacity(declarations.len());
    let mut locks = Vec::new();

    for (index, raw) in declarations.iter().enumerate() {
        let declaration: Declaration = serde_json::from_value(raw.clone())
            .map_err(|e| Error::invalid_declaration(index, e.to_string()))?;

        entries.push(CatalogEntry {
            id: declaration.id,
            name: declaration.name.clone(),
        });

        if !declaration.projects.iter().any(|p| p == project) {
            continue;
        }

        let schema = declaration.schema.ok_or_else(|| {
            Error::invalid_declaration(
                index,
                format!("'{}' is missing its schema", declaration.name),
            )
        })?;
        let schema: DeclaredSchema = serde_json::from_value(schema).map_err(|e| {
            Error::invalid_declaration(index, format!("schema of '{}': {}", declaration.name, e))
        })?;

        locks.push(Lock {
            id: declaration.id,
            name: declaration.name,
            kind: LockKind::from_declared(&schema.kind),
            count: schema.count.or_zero(),
            limit: schema.limit.or_zero(),
        });
    }

    Ok((Catalog::new(entries), Project::new(project, locks)))
}

fn declarations(root: &Value) -> Result<&Vec<Value>> {
    let mut current = root;
    for (depth, key) in LOCKS_PATH.iter().enumerate() {
        current = current
            .get(key)
            .ok_or_else(|| Error::missing_field(LOCKS_PATH[..=depth].join(".")))?;
    }
    current.as_array().ok_or_else(|| {
        Error::invalid_declaration(0, format!("'{}' must be an array", LOCKS_PATH.join(".")))
    })
}
