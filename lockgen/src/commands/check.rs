use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    config::Config,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Project to validate (defaults to MG100)
    pub project: Option<String>,

    /// Path to the lock document (defaults to ./lockings.json)
    pub document: Option<PathBuf>,

    /// Path to lockgen.toml (defaults to ./lockgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let settings = Config::load(self.config.as_deref())?
            .resolve(self.project.as_deref(), self.document.as_deref());

        let report = ops::check(&settings.document, &settings.project).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
