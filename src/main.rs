use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

use ytnotes::config::Config;
use ytnotes::core::NoteTaskHandler;
use ytnotes::exporter::NoteExporterImpl;
use ytnotes::extractor::{PageTitleExtractor, YtDlpExtractor};
use ytnotes::fetcher::MetadataFetcher;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(output) = args.output {
        config.notes_path = output;
    }
    init_logger(&config.log_path)?;

    info!("start running...");
    let url = match args.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };

    let fetcher = MetadataFetcher::new(
        YtDlpExtractor::new(config.socket_timeout_secs),
        PageTitleExtractor::new()?,
        config.max_attempts,
    );
    let handler = NoteTaskHandler::new(fetcher, NoteExporterImpl::new());

    if let Err(e) = handler.capture(&url, &config.notes_path).await {
        error!("run failed: {e}");
        return Err(e.into());
    }
    println!(
        "Successfully appended video information to {}",
        config.notes_path.display()
    );

    info!("done");
    Ok(())
}

fn prompt_for_url() -> Result<String> {
    print!("Enter YouTube URL: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Full detail goes to the log file (truncated each run); the console only
/// sees info and above.
fn init_logger(log_path: &Path) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(log_path)?;

    LogTracer::init()?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file))
                .with_filter(LevelFilter::DEBUG),
        )
        .with(
            fmt::layer().with_target(false).with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            ),
        )
        .init();
    Ok(())
}
