use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// dirtally - Count files and total folder sizes across a directory tree
#[derive(Parser, Debug)]
#[command(name = "dirtally")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and print the folder tree of a directory
    Scan(ScanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// How a finished tree is printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per folder, tab-indented
    Listing,
    /// Box-drawing tree with human-readable sizes
    Tree,
    /// JSON document
    Json,
}

/// Order of children in the printed tree
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Filesystem listing order
    None,
    Name,
    Size,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format [default: from config, else listing]
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Order children by [default: from config, else none]
    #[arg(short, long, value_enum, value_name = "BY")]
    pub sort: Option<SortOrder>,

    /// Count symbolic links as plain files instead of following them
    #[arg(short = 'P', long)]
    pub no_follow_links: bool,

    /// Abort when entries nest deeper than N levels
    #[arg(long, value_name = "N")]
    pub depth_limit: Option<usize>,

    /// Maximum depth to display (tree format)
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Hide per-folder file counts (tree format)
    #[arg(long)]
    pub no_counts: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Validates the CLI definition is correct
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_scan_command() {
        let cli = Cli::parse_from(["dirtally", "scan", "/home"]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.path, PathBuf::from("/home"));
                assert_eq!(args.format, None);
                assert_eq!(args.sort, None);
                assert!(!args.no_follow_links);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn parse_scan_defaults_to_current_dir() {
        let cli = Cli::parse_from(["dirtally", "scan"]);
        match cli.command {
            Command::Scan(args) => assert_eq!(args.path, PathBuf::from(".")),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn parse_scan_with_options() {
        let cli = Cli::parse_from([
            "dirtally",
            "scan",
            "--format",
            "tree",
            "--sort",
            "size",
            "-P",
            "--depth-limit",
            "64",
            "-d",
            "2",
            "/data",
        ]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.format, Some(OutputFormat::Tree));
                assert_eq!(args.sort, Some(SortOrder::Size));
                assert!(args.no_follow_links);
                assert_eq!(args.depth_limit, Some(64));
                assert_eq!(args.max_depth, Some(2));
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Cli::try_parse_from(["dirtally", "scan", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["dirtally", "-vvv", "scan"]);
        assert_eq!(cli.verbose, 3);
    }
}
