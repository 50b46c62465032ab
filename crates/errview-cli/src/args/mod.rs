// NOTE: Command Organization Rationale
//
// Why flat subcommands (not namespaced)?
// - Every command is a different view over the same snapshot
// - Namespaces would add a level without grouping anything
// - Example: `errview table /A/Step1` reads better than `errview view table /A/Step1`

mod commands;
mod enums;

pub use commands::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "errview")]
#[command(about = "Pivot per-workflow failure counts by step, site and error code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace directory holding config.toml [default: $ERRVIEW_PATH, then the XDG data dir]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Error-count source (file, directory or URL); replaces the configured sources
    #[arg(long = "source", global = true)]
    pub sources: Vec<String>,

    /// Read through a session-owned snapshot instead of the process-wide one
    #[arg(long, global = true)]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use errview_types::Dimension;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "errview",
            "global",
            "--split",
            "stepname",
            "--source",
            "a.json",
            "--source",
            "b.json",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.sources, vec!["a.json", "b.json"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Global {
                split: Dimension::Step
            }
        ));
    }

    #[test]
    fn test_unknown_split_pivots_by_error_code() {
        let cli = Cli::try_parse_from(["errview", "global", "--split", "bogus"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Global {
                split: Dimension::ErrorCode
            }
        ));
    }

    #[test]
    fn test_negative_error_code_is_a_value() {
        let cli = Cli::try_parse_from(["errview", "explain", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Explain { errorcode } if errorcode == "-1"));
    }

    #[test]
    fn test_ingest_needs_a_source() {
        assert!(Cli::try_parse_from(["errview", "ingest", "--db", "x.db"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
