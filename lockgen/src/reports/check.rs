//! Check command report data structures.

use super::{
    load::LoadReport,
    output::{Output, Report},
};

/// Report data from lock document validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Lock document summary.
    pub load: LoadReport,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.load.render(out);
        out.newline();
        out.preformatted(&format!(
            "✓ {} is valid for project {}",
            self.load.document.display(),
            self.load.summary.project
        ));
    }
}
