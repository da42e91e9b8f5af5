//! Lock document loading and validation.
//!
//! A lock document is a JSON file (with JSON references) that declares every
//! lock of the API under
//! `components.contentDescriptors.deviceParams.x-device-locks`. Loading it
//! yields two ordered lists: the [`Catalog`] of every declaration, used for
//! global uniqueness checks, and the [`Project`] locks assigned to one
//! hardware project, used for code generation.
//!
//! ```ignore
//! let document = LockDocument::open("lockings.json")?;
//! let (catalog, project) = document.extract("MG100")?;
//! Validator::new(&catalog, &project)
//!     .with_source(document.source())
//!     .run()?;
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod catalog;
mod document;
mod error;
mod refs;
mod validate;

pub use catalog::{Catalog, CatalogEntry, LOCKS_PATH, LoadSummary, Lock, OptionalNumber, Project};
pub use document::{LockDocument, bump_version_str};
pub use error::{Error, Result, Scope, SourceContext};
pub use validate::{Validator, validate};
