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
pub struct IdsCommand {
    /// Path to the lock document (defaults to ./lockings.json)
    pub document: Option<PathBuf>,

    /// Path to lockgen.toml (defaults to ./lockgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl IdsCommand {
    pub fn run(&self) -> Result<()> {
        let settings =
            Config::load(self.config.as_deref())?.resolve(None, self.document.as_deref());

        let report = ops::ids(&settings.document).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
