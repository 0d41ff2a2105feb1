//! CLI entry point for campdown.

use std::process::ExitCode;

use campdown::{DownloaderBuilder, Error, PageType};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

mod cli;

use cli::Args;

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_URL: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let mut builder = if args.quiet {
        DownloaderBuilder::hidden()
    } else {
        DownloaderBuilder::new()
    };
    if let Some(output) = args.output {
        builder = builder.directory(output);
    }
    let downloader = builder
        .force(args.force)
        .concurrent_downloads(usize::from(args.jobs))
        .retries(u32::from(args.retries))
        .build();

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cleaning up");
            interrupt.cancel();
        }
    });

    match downloader.run(&args.url, &cancel).await {
        Ok(report) => {
            info!(
                completed = report.completed(),
                failed = report.failed(),
                total = report.summaries().len(),
                "Run complete"
            );
            match report.page_type() {
                PageType::Unknown | PageType::NotRecognized => ExitCode::from(EXIT_FAILURE),
                _ => ExitCode::SUCCESS,
            }
        }
        Err(Error::Cancelled) => ExitCode::from(EXIT_CANCELLED),
        Err(e @ Error::InvalidUrl(_)) => {
            error!("{}", e);
            ExitCode::from(EXIT_INVALID_URL)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
