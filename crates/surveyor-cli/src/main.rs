//! Surveyor command-line runner.
//!
//! Launches Chromium, drives one survey to its finish screen and reports the
//! outcome. Exit code 0 means the finish screen was reached.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use surveyor_browser::BrowserEngine;
use surveyor_core::AppConfig;
use surveyor_engine::{SurveyParameters, SurveyTraversal, TraversalResult};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "surveyor")]
#[command(about = "Complete a multi-page customer survey in a real browser")]
#[command(version)]
struct Cli {
    /// Visit time printed on the receipt (HH:MM, 24-hour)
    time_of_day: String,

    /// Store number printed on the receipt
    store_id: String,

    /// Survey code printed on the receipt
    survey_code: String,

    /// Configuration file path (defaults to the platform config dir)
    #[arg(short, long, env = "SURVEYOR_CONFIG")]
    config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Seed for checkbox sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => AppConfig::load().context("failed to load config")?,
        };
        config.apply_env_overrides();

        if self.headed {
            config.browser.headless = false;
        }
        if let Some(seed) = self.seed {
            config.traversal.rng_seed = Some(seed);
        }
        Ok(config)
    }

    fn parameters(&self) -> SurveyParameters {
        SurveyParameters::new(&self.time_of_day, &self.store_id, &self.survey_code)
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,surveyor=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// One-line outcome for humans.
fn summary(result: &TraversalResult) -> String {
    match &result.reason {
        None => format!(
            "Survey completed: {} pages in {} iterations",
            result.pages_submitted, result.iterations
        ),
        Some(reason) if reason.is_pre_navigation() => format!("Survey not started: {reason}"),
        Some(reason) => format!(
            "Survey failed after {} pages: {reason}",
            result.pages_submitted
        ),
    }
}

fn report(result: &TraversalResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", summary(result));
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<TraversalResult> {
    let config = cli.load_config()?;
    let params = cli.parameters();

    info!(
        start_url = %config.survey.start_url,
        headless = config.browser.headless,
        "Launching browser"
    );
    let engine = BrowserEngine::with_config(&config.browser)
        .await
        .context("failed to launch browser")?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, cancelling survey");
            on_signal.cancel();
        }
    });

    let result = SurveyTraversal::new(&engine, &config)
        .with_cancellation(cancel)
        .run(&params)
        .await;

    if let Err(e) = engine.close().await {
        tracing::warn!("Failed to close browser cleanly: {}", e);
    }
    report(&result, cli.json)?;
    Ok(result)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    info!("Starting surveyor v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match run(cli).await {
        Ok(result) if result.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
