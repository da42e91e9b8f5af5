//! Generate operation - splice fresh fragments into the target files.

use std::path::PathBuf;

use eyre::{Context, Result};
use lockgen_codegen::{Generator, Target, TargetPaths};
use thiserror::Error;

use super::{Loaded, load};
use crate::{
    config::Settings,
    reports::{CreatedDir, FileOutcome, FileReport, GenerateReport},
};

/// A target file that generation needs but cannot create.
#[derive(Debug, Error)]
#[error("Missing {target} file for project {project} at {}", .path.display())]
pub struct MissingFileError {
    pub target: Target,
    pub project: String,
    pub path: PathBuf,
}

/// Why a generate run stopped before producing a report.
#[derive(Debug)]
pub enum GenerateError {
    /// The lock document failed to load or validate.
    Document(Box<lockgen_manifest::Error>),
    /// Target preparation, splicing or writing failed.
    Other(eyre::Report),
}

impl From<Box<lockgen_manifest::Error>> for GenerateError {
    fn from(err: Box<lockgen_manifest::Error>) -> Self {
        GenerateError::Document(err)
    }
}

impl From<eyre::Report> for GenerateError {
    fn from(err: eyre::Report) -> Self {
        GenerateError::Other(err)
    }
}

/// Prepare the targets, load the document, then splice and write.
///
/// A document that fails to load or validate leaves both target files as
/// they were.
pub fn run(
    settings: &Settings,
    dry_run: bool,
) -> std::result::Result<GenerateReport, GenerateError> {
    let created = prepare_targets(&settings.paths, &settings.project, dry_run)?;
    let loaded = load(&settings.document, &settings.project)?;
    Ok(generate(&loaded, &settings.paths, created, dry_run)?)
}

/// Make sure the project folders exist and both target files are present.
///
/// Missing folders are created unless `dry_run` is set; missing files are
/// an error either way since their hand-written parts cannot be generated.
pub fn prepare_targets(
    paths: &TargetPaths,
    project: &str,
    dry_run: bool,
) -> Result<Vec<CreatedDir>> {
    let mut created = Vec::new();

    if !dry_run {
        let dirs = [
            ("base", paths.base().to_path_buf()),
            ("header", paths.dir(Target::Header)),
            ("source", paths.dir(Target::Source)),
        ];
        for (kind, path) in dirs {
            if !path.is_dir() {
                std::fs::create_dir_all(&path)
                    .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
                created.push(CreatedDir { kind, path });
            }
        }
    }

    for target in Target::ALL {
        let path = paths.file(target);
        if !path.is_file() {
            return Err(MissingFileError {
                target,
                project: project.to_string(),
                path,
            }
            .into());
        }
    }

    Ok(created)
}

/// Execute the generate operation.
///
/// Both files are spliced in memory before either is written.
pub fn generate(
    loaded: &Loaded,
    paths: &TargetPaths,
    created_dirs: Vec<CreatedDir>,
    dry_run: bool,
) -> Result<GenerateReport> {
    let generator = Generator::new(&loaded.project);

    let files = if dry_run {
        generator
            .preview(paths)?
            .into_iter()
            .map(|file| FileReport {
                target: file.target,
                unmatched: file.is_unmatched(),
                unrecognized: file.unrecognized,
                path: file.path,
                outcome: FileOutcome::Preview(file.content),
            })
            .collect()
    } else {
        generator
            .generate(paths)
            .wrap_err("Failed to generate locking table")?
            .files
            .into_iter()
            .map(|generated| FileReport {
                target: generated.file.target,
                unmatched: generated.file.is_unmatched(),
                unrecognized: generated.file.unrecognized,
                path: generated.file.path,
                outcome: FileOutcome::Written(generated.result),
            })
            .collect()
    };

    Ok(GenerateReport {
        project: loaded.project.name().to_string(),
        created_dirs,
        load: loaded.report(),
        files,
    })
}
