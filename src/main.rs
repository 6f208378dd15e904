//! kalshi-tui - a terminal client for Kalshi prediction markets.

use anyhow::Context;
use clap::Parser;
use kalshi_tui::api::{KalshiClient, MarketApi};
use kalshi_tui::cli::{Cli, Command};
use kalshi_tui::{App, Config, commands, config};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.resolved_command();

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = init_logging(command == Command::Tui)?;

    // Load configuration
    let mut config = Config::load(cli.config.clone()).context("Failed to load configuration")?;
    if cli.demo {
        config.api.demo = true;
    }

    let mut out = std::io::stdout();
    match command {
        Command::Tui => {
            let api = connect(&config)?;
            let mut app = App::new(config, api)?;
            app.run().await?;
        }
        Command::Query { category, tags } => {
            let api = connect(&config)?;
            let category = category.unwrap_or_else(|| config.ui.series_category.clone());
            let tags = tags.unwrap_or_else(|| config.ui.series_tags.clone());
            commands::query(&mut out, api.as_ref(), &category, &tags)
                .await
                .context("Error querying markets")?;
        }
        Command::CheckAuth => {
            let api = connect(&config)?;
            commands::check_auth(&mut out, api.as_ref())
                .await
                .context("Authentication failed")?;
        }
        Command::Status => {
            let api = connect(&config)?;
            commands::status(&mut out, api.as_ref()).await?;
        }
        Command::Demo => commands::demo(&mut out)?,
    }

    Ok(())
}

fn connect(config: &Config) -> anyhow::Result<Arc<dyn MarketApi>> {
    let client = KalshiClient::new(config.api.clone()).context("Failed to create Kalshi client")?;
    Ok(Arc::new(client))
}

/// The browser owns the screen, so it logs to a daily file; everything else
/// logs to stderr.
fn init_logging(to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "kalshi_tui=info".into());

    if !to_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
        return Ok(None);
    }

    let dir = config::log_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "kalshi-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}
