//! Ids operation - inspect API id allocation.

use std::path::Path;

use lockgen_manifest::{Error, LockDocument, Result};

use crate::reports::IdsReport;

/// Execute the ids operation.
///
/// The document is only read; its version is left as it is.
pub fn ids(document: &Path) -> Result<IdsReport> {
    let content = std::fs::read_to_string(document).map_err(|source| {
        Box::new(Error::Io {
            path: document.to_path_buf(),
            source,
        })
    })?;
    let base_dir = document.parent().unwrap_or(Path::new("."));
    let parsed = LockDocument::parse(content, document.display().to_string(), base_dir)?;
    // The project filter does not affect the catalog.
    let (catalog, _) = parsed.extract("")?;

    let mut entries = catalog.entries().to_vec();
    entries.sort_by_key(|e| e.id);
    let next_free = (0..=u32::MAX)
        .find(|id| !catalog.contains_id(*id))
        .unwrap_or(u32::MAX);

    Ok(IdsReport {
        document: document.to_path_buf(),
        entries,
        available: catalog.available_ids(),
        next_free,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::load::tests::{DOC, write_doc};

    #[test]
    fn test_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), DOC);

        let report = ids(&path).unwrap();

        let ids: Vec<u32> = report.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(report.available, vec![0]);
        assert_eq!(report.next_free, 0);
    }

    #[test]
    fn test_ids_does_not_bump_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), DOC);

        ids(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), DOC);
    }

    #[test]
    fn test_ids_next_free_past_dense_range() {
        let dir = tempfile::tempdir().unwrap();
        let doc = DOC
            .replace("\"x-id\": 1,", "\"x-id\": 0,")
            .replace("\"x-id\": 4,", "\"x-id\": 1,");
        let path = write_doc(dir.path(), &doc);

        let report = ids(&path).unwrap();

        assert!(report.available.is_empty());
        assert_eq!(report.next_free, 3);
    }
}
