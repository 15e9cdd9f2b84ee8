//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::platform::Platform;

/// appfetch - install desktop applications from a curated catalog
#[derive(Debug, Parser)]
#[command(name = "appfetch")]
#[command(about = "Install desktop applications from a curated catalog")]
#[command(version)]
pub struct Cli {
    /// Override host platform detection (windows, linux, mac)
    #[arg(long, global = true, value_enum)]
    pub platform: Option<Platform>,

    /// Directory where downloaded installers are stored
    #[arg(long, global = true)]
    pub downloads_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the named applications without the TUI
    Install {
        /// Application names exactly as shown by `appfetch list`
        #[arg(required = true)]
        apps: Vec<String>,

        /// Write the final run report as JSON to this path
        #[arg(long)]
        report_json: Option<PathBuf>,
    },
    /// List the catalog and per-platform availability
    List,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args_defaults_to_tui() {
        let cli = Cli::try_parse_from(["appfetch"]).expect("should parse");
        assert!(cli.command.is_none());
        assert!(cli.platform.is_none());
    }

    #[test]
    fn test_cli_install_requires_apps() {
        let result = Cli::try_parse_from(["appfetch", "install"]);
        assert!(result.is_err(), "install with no apps must be rejected");
    }

    #[test]
    fn test_cli_install_collects_apps_in_order() {
        let cli = Cli::try_parse_from(["appfetch", "install", "Vim", "7-Zip"])
            .expect("should parse");
        match cli.command {
            Some(Commands::Install { apps, .. }) => {
                assert_eq!(apps, vec!["Vim".to_string(), "7-Zip".to_string()]);
            }
            other => panic!("expected Install command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_platform_override() {
        let cli = Cli::try_parse_from(["appfetch", "--platform", "mac", "list"])
            .expect("should parse");
        assert_eq!(cli.platform, Some(Platform::Mac));
    }
}
