//! Core operations.
//!
//! This module contains the business logic for lockgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod ids;
pub mod load;

pub use check::check;
pub use generate::GenerateError;
pub use ids::ids;
pub use load::{Loaded, load};
