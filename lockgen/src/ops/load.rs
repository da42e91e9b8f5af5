//! Load operation - open, extract and validate the lock document.

use std::path::{Path, PathBuf};

use lockgen_manifest::{Catalog, LockDocument, Project, Result, Validator};

use crate::reports::LoadReport;

/// A validated lock document with the locks of one project.
#[derive(Debug)]
pub struct Loaded {
    pub path: PathBuf,
    pub document: LockDocument,
    pub catalog: Catalog,
    pub project: Project,
}

impl Loaded {
    pub fn report(&self) -> LoadReport {
        LoadReport {
            document: self.path.clone(),
            summary: self.document.summary(&self.catalog, &self.project),
        }
    }
}

/// Execute the load operation.
///
/// Opening the document bumps its version on disk; validation runs after
/// that and before anything else reads the locks.
pub fn load(path: &Path, project: &str) -> Result<Loaded> {
    let document = LockDocument::open(path)?;
    let (catalog, project) = document.extract(project)?;

    Validator::new(&catalog, &project)
        .with_source(document.source())
        .run()?;

    Ok(Loaded {
        path: path.to_path_buf(),
        document,
        catalog,
        project,
    })
}
