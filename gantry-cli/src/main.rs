//! Gantry CLI
//!
//! Talks to the assistant service through the retrying transport.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gantry::gobserve::SafeTransportHooks;
use gantry::{AssistantClient, AssistantConfig, TracingObservabilityHooks};

mod app;
mod commands;

use app::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    gantry::ensure_env_loaded();
    let cli = Cli::parse();
    let url = cli.url.clone();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            println!("Error: {error}");
            println!("Hint: make sure the assistant service is running at {url}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AssistantConfig::from_env()?
        .with_base_url(cli.url)
        .with_timeout(Duration::from_secs(cli.timeout));
    let client = AssistantClient::new(config)?
        .with_hooks(Arc::new(SafeTransportHooks::new(TracingObservabilityHooks)));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &client, &mut out).await
}
