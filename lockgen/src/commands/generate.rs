use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    config::Config,
    ops::{self, GenerateError},
    reports::{GenerateReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Project whose locks are generated (defaults to MG100)
    pub project: Option<String>,

    /// Path to the lock document (defaults to ./lockings.json)
    pub document: Option<PathBuf>,

    /// Print the spliced files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Path to lockgen.toml (defaults to ./lockgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let settings = Config::load(self.config.as_deref())?
            .resolve(self.project.as_deref(), self.document.as_deref());

        let report = match ops::generate::run(&settings, self.dry_run) {
            Ok(report) => report,
            Err(GenerateError::Document(err)) => Err::<GenerateReport, _>(err).unwrap_or_exit(),
            Err(GenerateError::Other(err)) => return Err(err),
        };

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
