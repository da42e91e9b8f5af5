//! Regenerates the header and source file of one project.

use std::path::PathBuf;

use eyre::{Result, WrapErr};
use lockgen_core::{TargetFile, WriteResult};
use lockgen_manifest::Project;

use crate::{Emitter, Region, Splicer, Target, TargetPaths};

/// A spliced target file that has not been written yet.
#[derive(Debug)]
pub struct PreviewFile {
    pub target: Target,
    pub path: PathBuf,
    pub content: String,
    pub filled: Vec<Region>,
    pub unrecognized: Vec<String>,
}

impl PreviewFile {
    /// The file contained no region its target knows how to fill.
    pub fn is_unmatched(&self) -> bool {
        self.filled.is_empty()
    }
}

/// Outcome of writing one target file.
#[derive(Debug)]
pub struct GeneratedFile {
    pub file: PreviewFile,
    pub result: WriteResult,
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Target files in header, source order.
    pub files: Vec<GeneratedFile>,
}

/// Splices freshly emitted fragments into a project's target files.
pub struct Generator<'a> {
    emitter: Emitter<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            emitter: Emitter::new(project),
        }
    }

    pub fn project(&self) -> &'a Project {
        self.emitter.project()
    }

    /// A splicer filling every region that belongs to `target`.
    pub fn splicer(&self, target: Target) -> Splicer<'a> {
        let emitter = self.emitter;
        target
            .regions()
            .iter()
            .fold(Splicer::new(), |splicer, &region| {
                splicer.region(region, move || emitter.render(region))
            })
    }

    /// Splice both target files in memory without writing anything.
    pub fn preview(&self, paths: &TargetPaths) -> Result<Vec<PreviewFile>> {
        Target::ALL
            .into_iter()
            .map(|target| {
                let path = paths.file(target);
                let output = self
                    .splicer(target)
                    .splice_path(&path)
                    .wrap_err_with(|| format!("failed to splice {}", path.display()))?;

                Ok(PreviewFile {
                    target,
                    path,
                    content: output.content,
                    filled: output.filled,
                    unrecognized: output.unrecognized,
                })
            })
            .collect()
    }

    /// Splice both target files, then write them.
    ///
    /// Neither file is written unless both splice successfully.
    pub fn generate(&self, paths: &TargetPaths) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for file in self.preview(paths)? {
            let write = TargetFile::new(&file.path, file.content.as_str()).write()?;
            result.files.push(GeneratedFile {
                file,
                result: write,
            });
        }

        Ok(result)
    }
}
