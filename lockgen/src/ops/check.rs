//! Check operation - lock document validation.

use std::path::Path;

use lockgen_manifest::Result;

use super::load;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Loads and validates the document without touching any target file.
pub fn check(document: &Path, project: &str) -> Result<CheckReport> {
    let loaded = load(document, project)?;

    Ok(CheckReport {
        load: loaded.report(),
    })
}
