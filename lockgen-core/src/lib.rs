//! Core utilities and types for the lockgen locking table generator.
//!
//! This crate provides fundamental types shared by the document loader,
//! the code emitter and the command line front end.

mod file;
mod types;
mod version;

// File operations
pub use file::{TargetFile, WriteResult};
// Fundamental types
pub use types::LockKind;
pub use version::Version;
