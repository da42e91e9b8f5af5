//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod ids;
mod load;
mod output;

pub use check::CheckReport;
pub use generate::{CreatedDir, FileOutcome, FileReport, GenerateReport};
pub use ids::IdsReport;
pub use load::LoadReport;
pub use output::{Report, TerminalOutput};
