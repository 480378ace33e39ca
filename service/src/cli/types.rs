//! CLI type definitions and enums

use clap::{Parser, Subcommand, ValueEnum};
use sheet2lua_core::AudienceFilter;
use std::path::PathBuf;

/// sheet2lua command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "sheet2lua",
    version,
    about = "Compile xlsx data sheets into Lua table sources"
)]
pub struct Sheet2LuaCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report format
    #[arg(short = 'f', long, global = true, default_value = "pretty")]
    pub format: ReportFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Sheet2LuaCommand,
}

/// Report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable output
    Pretty,
    /// JSON output
    Json,
}

/// Build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudienceArg {
    /// Client build
    Client,
    /// Server build
    Server,
}

impl From<AudienceArg> for AudienceFilter {
    fn from(arg: AudienceArg) -> Self {
        match arg {
            AudienceArg::Client => Self::Client,
            AudienceArg::Server => Self::Server,
        }
    }
}

/// sheet2lua subcommands
#[derive(Subcommand, Debug)]
pub enum Sheet2LuaCommand {
    /// Compile workbook sheets into Lua files
    Convert {
        /// Workbook path
        #[arg(short, long, default_value = "input.xlsx")]
        input: PathBuf,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Build target
        #[arg(short, long, value_enum)]
        audience: Option<AudienceArg>,
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Only compile the named sheet (repeatable)
        #[arg(long = "sheet")]
        sheets: Vec<String>,
        /// Cells dropped from the end of every data row
        #[arg(long)]
        trailing_columns: Option<usize>,
        /// Print generated files instead of writing them
        #[arg(long)]
        dry_run: bool,
        /// Exit with an error if any sheet fails
        #[arg(long)]
        strict: bool,
    },

    /// Show the parsed schema of each sheet
    Schema {
        /// Workbook path
        #[arg(short, long, default_value = "input.xlsx")]
        input: PathBuf,
        /// Only show the named sheet (repeatable)
        #[arg(long = "sheet")]
        sheets: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Sheet2LuaCli::parse_from([
            "sheet2lua", "-v", "convert", "-i", "data.xlsx", "-a", "server", "--sheet", "hero",
            "--sheet", "item", "--strict",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format, ReportFormat::Pretty);
        match cli.command {
            Sheet2LuaCommand::Convert {
                input,
                audience,
                sheets,
                strict,
                dry_run,
                ..
            } => {
                assert_eq!(input, PathBuf::from("data.xlsx"));
                assert_eq!(audience.map(AudienceFilter::from), Some(AudienceFilter::Server));
                assert_eq!(sheets, vec!["hero".to_string(), "item".to_string()]);
                assert!(strict);
                assert!(!dry_run);
            }
            Sheet2LuaCommand::Schema { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Sheet2LuaCli::try_parse_from(["sheet2lua", "-v", "-q", "schema"]);
        assert!(result.is_err());
    }
}
