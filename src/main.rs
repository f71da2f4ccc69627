use std::fs::{self, File};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::Cli;
use gazette::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    Cli::parse();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gazette: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::load().context("loading configuration")?;
    let ctx = AppContext::new(&config).context("setting up HTTP client")?;

    gazette::tui::run(Arc::new(ctx), Arc::new(config)).await?;
    Ok(())
}

/// Log to a file; stdout belongs to the terminal UI.
fn init_logging() -> anyhow::Result<()> {
    let Some(cache_dir) = dirs::cache_dir() else {
        return Ok(());
    };
    let log_dir = cache_dir.join("gazette");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let log_file = File::create(log_dir.join("gazette.log"))
        .with_context(|| format!("creating log file in {}", log_dir.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gazette=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .with(filter)
        .init();

    Ok(())
}
