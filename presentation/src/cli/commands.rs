//! CLI command definitions

use bridge_domain::Mode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Mode filter for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeFilter {
    Read,
    Write,
}

impl From<ModeFilter> for Mode {
    fn from(filter: ModeFilter) -> Self {
        match filter {
            ModeFilter::Read => Mode::Read,
            ModeFilter::Write => Mode::Write,
        }
    }
}

/// CLI arguments for sdk-bridge
#[derive(Parser, Debug)]
#[command(name = "sdk-bridge")]
#[command(author, version, about = "Expose client library operations as callable tools")]
#[command(long_about = r#"
sdk-bridge builds a catalog of tools from client libraries and executes
JSON payloads against them.

Tools come from two sources:
1. Reflective discovery: --package flags and [discovery] packages
2. Declared providers: [[providers]] entries in the config file

Write-mode tools refuse to run unless the payload carries confirm=true
(or dry_run=true to preview the call).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file (TOML, or YAML by extension)
2. ./sdk-bridge.toml   Project-level config
3. ~/.config/sdk-bridge/config.toml   Global config

Example:
  sdk-bridge --package stub list
  sdk-bridge --package stub call stub_Greeter_greet '{"name": "Ada"}'
  sdk-bridge serve
"#)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Library to discover reflectively (can be specified multiple times)
    #[arg(short, long, global = true, value_name = "PKG")]
    pub package: Vec<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tool catalog
    List {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,

        /// Only list tools of this mode
        #[arg(long, value_enum)]
        mode: Option<ModeFilter>,
    },

    /// Invoke one tool and print the outcome as JSON
    Call {
        /// Tool name as shown by `list`
        tool: String,

        /// JSON object payload (defaults to `{}`)
        payload: Option<String>,

        /// Bind the arguments and report the call without executing it
        #[arg(long)]
        dry_run: bool,

        /// Acknowledge a write-mode call
        #[arg(long)]
        confirm: bool,
    },

    /// Serve the catalog as a JSON-RPC tool server on stdin/stdout
    Serve,

    /// Show configuration file locations and exit
    ShowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call_with_global_flags() {
        let cli = Cli::parse_from([
            "sdk-bridge",
            "--package",
            "stub",
            "-vv",
            "call",
            "stub_Greeter_greet",
            r#"{"name": "Ada"}"#,
            "--confirm",
        ]);

        assert_eq!(cli.package, vec!["stub"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Call {
                tool,
                payload,
                dry_run,
                confirm,
            } => {
                assert_eq!(tool, "stub_Greeter_greet");
                assert_eq!(payload.as_deref(), Some(r#"{"name": "Ada"}"#));
                assert!(!dry_run);
                assert!(confirm);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_mode_filter() {
        let cli = Cli::parse_from(["sdk-bridge", "list", "--json", "--mode", "write"]);
        match cli.command {
            Commands::List { json, mode } => {
                assert!(json);
                assert_eq!(mode.map(Mode::from), Some(Mode::Write));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sdk-bridge", "serve", "--no-config", "-p", "github"]);
        assert!(cli.no_config);
        assert_eq!(cli.package, vec!["github"]);
        assert!(matches!(cli.command, Commands::Serve));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
