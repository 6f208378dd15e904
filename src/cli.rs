//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"Browse Kalshi prediction markets from the terminal.

CREDENTIALS:
    Set KALSHI_API_KEY and KALSHI_PRIVATE_KEY, or api.key_id and
    api.private_key_path in the config file. Any setting can also be given as
    KALSHI_TUI__SECTION__KEY, e.g. KALSHI_TUI__API__DEMO=true.

EXAMPLES:
    kalshi-tui                    # interactive browser
    kalshi-tui query --category Economics --tags CPI
    kalshi-tui --demo check-auth
    kalshi-tui status"#;

#[derive(Debug, Parser)]
#[command(name = "kalshi-tui")]
#[command(author, version)]
#[command(about = "Terminal client for the Kalshi prediction market API")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (default: <config_dir>/config.toml)
    #[arg(short, long, global = true, env = "KALSHI_TUI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use the demo exchange
    #[arg(long, global = true)]
    pub demo: bool,
}

impl Cli {
    /// The subcommand to run; the browser when none was given.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive series and event browser
    Tui,

    /// Walk series, events and markets once and print them as tables
    Query {
        /// Series category
        #[arg(long)]
        category: Option<String>,

        /// Series tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Verify credentials by fetching the account balance
    #[command(name = "check-auth")]
    CheckAuth,

    /// Print the exchange status as JSON
    Status,

    /// Show the terminal styling showcase (no network)
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli::try_parse_from(["kalshi-tui"]).unwrap();
        assert_eq!(cli.resolved_command(), Command::Tui);
        assert!(!cli.demo);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_query_filters() {
        let cli = Cli::try_parse_from([
            "kalshi-tui",
            "query",
            "--category",
            "Economics",
            "--tags",
            "CPI",
        ])
        .unwrap();
        assert_eq!(
            cli.resolved_command(),
            Command::Query {
                category: Some("Economics".to_string()),
                tags: Some("CPI".to_string()),
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["kalshi-tui", "check-auth", "--demo", "--config", "/tmp/k.toml"])
                .unwrap();
        assert_eq!(cli.resolved_command(), Command::CheckAuth);
        assert!(cli.demo);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/k.toml")));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["kalshi-tui", "trade"]).is_err());
    }
}
