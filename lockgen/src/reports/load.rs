//! Lock document load summary.

use std::path::PathBuf;

use lockgen_manifest::LoadSummary;

use super::output::{Output, Report};

/// What was read from the lock document.
#[derive(Debug)]
pub struct LoadReport {
    /// Path to the lock document.
    pub document: PathBuf,
    pub summary: LoadSummary,
}

/// Comma separated ids, or `none`.
pub(crate) fn join_ids(ids: &[u32]) -> String {
    if ids.is_empty() {
        "none".to_string()
    } else {
        ids.iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Report for LoadReport {
    fn render(&self, out: &mut dyn Output) {
        let summary = &self.summary;

        out.key_value("Reading", &self.document.display().to_string());
        out.key_value("Document version", &summary.version.to_string());
        out.key_value("API total locks", &summary.catalog_size.to_string());
        out.key_value(
            &format!("Project {} locks", summary.project),
            &summary.project_locks.to_string(),
        );
        out.key_value(
            &format!("Project {} maximum id", summary.project),
            &summary
                .max_id
                .map_or_else(|| "none".to_string(), |id| id.to_string()),
        );
        out.key_value("Available API ids", &join_ids(&summary.available_ids));
    }
}
