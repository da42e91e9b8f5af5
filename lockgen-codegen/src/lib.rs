//! C code generation for the locking table.
//!
//! This crate turns a validated [`Project`](lockgen_manifest::Project) into
//! C fragments and splices them between marker comments of the project's
//! `locking_table.h` and `locking_table.c`.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented line building (CodeBuilder)
//! - [`emit`] - Fragment emitters with fixed column widths
//! - [`splice`] - Marker-region state machine
//! - [`generator`] - Both target files of a project, previewed or written

pub mod builder;
pub mod emit;
mod error;
pub mod generator;
mod region;
pub mod splice;

pub use emit::Emitter;
pub use error::{EmitError, SpliceError};
pub use generator::{GenerateResult, GeneratedFile, Generator, PreviewFile};
pub use region::{
    DEFAULT_BASE_PATH, DEFAULT_TABLE_FILE_NAME, PROJECT_PLACEHOLDER, Region, Target, TargetPaths,
};
pub use splice::{Marker, SpliceOutput, Splicer};
