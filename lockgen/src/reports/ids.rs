//! Ids command report data structures.

use std::path::PathBuf;

use lockgen_manifest::CatalogEntry;

use super::{
    load::join_ids,
    output::{Output, Report},
};

/// Report data describing how API ids are allocated.
#[derive(Debug)]
pub struct IdsReport {
    /// Path to the lock document.
    pub document: PathBuf,
    /// Every declaration, ordered by id.
    pub entries: Vec<CatalogEntry>,
    /// Ids below the catalog size that nothing declares.
    pub available: Vec<u32>,
    /// Smallest id not yet used, for the next declaration.
    pub next_free: u32,
}

impl Report for IdsReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Reading", &self.document.display().to_string());
        out.section(&format!("API locks ({})", self.entries.len()));
        for entry in &self.entries {
            out.list_item(&format!("{:<3} {}", entry.id, entry.name));
        }
        out.newline();
        out.key_value("Available API ids", &join_ids(&self.available));
        out.key_value("Next free id", &self.next_free.to_string());
    }
}
