//! Generate command report data structures.

use std::path::PathBuf;

use lockgen_codegen::Target;
use lockgen_core::WriteResult;

use super::{
    load::LoadReport,
    output::{Output, Report},
};

/// Report data from locking table generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project the files were generated for.
    pub project: String,

    /// Folders created because they did not exist.
    pub created_dirs: Vec<CreatedDir>,

    /// Lock document summary.
    pub load: LoadReport,

    /// One entry per target file, header first.
    pub files: Vec<FileReport>,
}

/// A folder created for the project.
#[derive(Debug)]
pub struct CreatedDir {
    /// `base`, `header` or `source`.
    pub kind: &'static str,
    pub path: PathBuf,
}

/// What happened to one target file.
#[derive(Debug)]
pub struct FileReport {
    pub target: Target,
    pub path: PathBuf,
    /// No region of the file was recognized.
    pub unmatched: bool,
    /// Labels of begin markers that were left empty.
    pub unrecognized: Vec<String>,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub enum FileOutcome {
    Written(WriteResult),
    /// Dry-run: the spliced content that would have been written.
    Preview(String),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for dir in &self.created_dirs {
            out.added_item(&format!(
                "Created {} folder for project {} at {}",
                dir.kind,
                self.project,
                dir.path.display()
            ));
        }

        self.load.render(out);

        for file in &self.files {
            file.render(out);
        }
    }
}

impl Report for FileReport {
    fn render(&self, out: &mut dyn Output) {
        let path = self.path.display().to_string();

        if self.unmatched {
            out.warning(&format!(
                "no recognized marker region in {} file {}",
                self.target, path
            ));
        }
        for label in &self.unrecognized {
            out.warning(&format!("unknown region '{}' in {} left empty", label, path));
        }

        match &self.outcome {
            FileOutcome::Written(WriteResult::Written) => out.key_value("Writing", &path),
            FileOutcome::Written(WriteResult::Unchanged) => out.key_value("Unchanged", &path),
            FileOutcome::Preview(content) => {
                out.divider(&path);
                out.preformatted(content.trim_end());
                out.newline();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lockgen_core::Version;
    use lockgen_manifest::LoadSummary;

    use super::*;
    use crate::reports::output::CapturedOutput;

    fn load() -> LoadReport {
        LoadReport {
            document: PathBuf::from("lockings.json"),
            summary: LoadSummary {
                version: Version::new(0, 1, 1),
                project: "X".into(),
                catalog_size: 1,
                project_locks: 1,
                max_id: Some(0),
                available_ids: Vec::new(),
            },
        }
    }

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            project: "X".into(),
            created_dirs: vec![CreatedDir {
                kind: "header",
                path: PathBuf::from("custom/X/include"),
            }],
            load: load(),
            files: vec![FileReport {
                target: Target::Header,
                path: PathBuf::from("custom/X/include/locking_table.h"),
                unmatched: false,
                unrecognized: Vec::new(),
                outcome: FileOutcome::Written(WriteResult::Written),
            }],
        };

        let out = CapturedOutput::render(&report);

        assert_eq!(
            out.lines.first().map(String::as_str),
            Some("+ Created header folder for project X at custom/X/include")
        );
        assert!(out.contains("Writing: custom/X/include/locking_table.h"));
        assert!(!out.contains("warning"));
    }

    #[test]
    fn test_render_warns_on_unmatched_file() {
        let report = FileReport {
            target: Target::Source,
            path: PathBuf::from("locking_table.c"),
            unmatched: true,
            unrecognized: vec!["attribute table".into()],
            outcome: FileOutcome::Written(WriteResult::Unchanged),
        };

        let out = CapturedOutput::render(&report);

        assert!(
            out.contains("warning: no recognized marker region in source file locking_table.c")
        );
        assert!(out.contains("unknown region 'attribute table'"));
        assert!(out.contains("Unchanged: locking_table.c"));
    }

    #[test]
    fn test_render_preview() {
        let report = FileReport {
            target: Target::Source,
            path: PathBuf::from("locking_table.c"),
            unmatched: false,
            unrecognized: Vec::new(),
            outcome: FileOutcome::Preview("/* pystart - init */\n/* pyend */\n".into()),
        };

        let out = CapturedOutput::render(&report);

        assert_eq!(
            out.lines,
            vec![
                "-- locking_table.c --",
                "/* pystart - init */\n/* pyend */",
                ""
            ]
        );
    }
}
