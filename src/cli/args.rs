use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Startup arguments
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Sectioned note organizer with file export and import"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Workspace file to load before the prompt opens
    #[clap(short, long, value_parser)]
    pub import: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,
}

/// One line typed at the prompt
#[derive(Parser, Debug)]
#[clap(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_line() {
        let line = ShellLine::try_parse_from(["add-note", "todo", "buy milk"]).unwrap();
        assert_eq!(
            line.command,
            Commands::AddNote {
                category: "todo".into(),
                content: "buy milk".into()
            }
        );
        let line = ShellLine::try_parse_from(["exit"]).unwrap();
        assert_eq!(line.command, Commands::Quit);
    }

    #[test]
    fn test_parse_startup_flags() {
        let cli = Cli::try_parse_from(["secnotes", "-v", "--import", "data.json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.import, Some(PathBuf::from("data.json")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_reject_bad_id() {
        assert!(ShellLine::try_parse_from(["select", "abc"]).is_err());
    }
}
