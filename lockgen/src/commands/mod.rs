mod check;
mod completions;
mod generate;
mod ids;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use ids::IdsCommand;

/// Extension trait for exiting on lock document errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for lockgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Without a subcommand, `lockgen [PROJECT] [DOCUMENT]` generates the
/// locking table.
#[derive(Parser)]
#[command(name = "lockgen")]
#[command(version)]
#[command(about = "Generate Zephyr locking tables from a JSON lock document")]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateCommand,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            None => self.generate.run(),
            Some(Commands::Check(cmd)) => cmd.run(),
            Some(Commands::Ids(cmd)) => cmd.run(),
            Some(Commands::Completions(cmd)) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the lock document without touching the target files
    Check(CheckCommand),

    /// List declared API ids and the ones still available
    Ids(IdsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_generate() {
        let cli = Cli::try_parse_from(["lockgen", "BL5340", "api.json", "--dry-run"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.generate.project.as_deref(), Some("BL5340"));
        assert_eq!(cli.generate.document.as_deref(), Some(Path::new("api.json")));
        assert!(cli.generate.dry_run);
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["lockgen"]).unwrap();

        assert!(cli.command.is_none());
        assert!(cli.generate.project.is_none());
        assert!(cli.generate.document.is_none());
    }

    #[test]
    fn test_check_subcommand() {
        let cli = Cli::try_parse_from(["lockgen", "check", "MG100"]).unwrap();

        assert!(matches!(cli.command, Some(Commands::Check(_))));
    }
}
