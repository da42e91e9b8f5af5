use std::path::PathBuf;

use thiserror::Error;

/// Fragment emission failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    /// The fragment is defined over the id range, which an empty project lacks.
    #[error("project '{project}' has no locks; cannot emit the {fragment} fragment")]
    EmptyProject {
        project: String,
        fragment: &'static str,
    },
}

/// Failure while splicing fragments into a target file.
#[derive(Debug, Error)]
pub enum SpliceError {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "begin marker on line {line} opens a region while the region from line {open} is still open"
    )]
    NestedMarker { line: usize, open: usize },

    #[error("region opened on line {line} has no end marker")]
    UnterminatedRegion { line: usize },

    #[error(transparent)]
    Emit(#[from] EmitError),
}
