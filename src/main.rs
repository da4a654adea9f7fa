//! Methanol Yield Predictor
//!
//! Serves the reaction-conditions form and forwards each submission to the
//! remote yield model.
//!
//! # Usage
//!
//! ```bash
//! # Serve the form on the configured address
//! ./methanol-yield
//!
//! # One-off prediction from the terminal
//! ./methanol-yield predict --temperature 500 --pressure 80 \
//!     --residence-time-1 15 --residence-time-2 8
//!
//! # Check a config file without starting anything
//! ./methanol-yield check-config --path predictor_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `PREDICTOR_CONFIG`: Path to the TOML config (default: `./predictor_config.toml`)
//! - `PREDICTOR_SERVER_ADDR`: Override the bind address
//! - `PREDICTOR_ENDPOINT`: Override the model endpoint
//! - `PREDICTOR_CORS_ORIGINS`: Comma-separated origins allowed to call the API
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use methanol_yield::api::{create_app, ApiState};
use methanol_yield::config::{AppConfig, LOCAL_CONFIG_FILE};
use methanol_yield::render::render_outcome;
use methanol_yield::{ConditionsForm, HttpPredictionClient, SubmissionService};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "methanol-yield")]
#[command(about = "Methanol Synthesis Yield Predictor")]
#[command(version)]
struct CliArgs {
    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Override the server address (default from config: "0.0.0.0:8080")
    #[arg(short, long, env = "PREDICTOR_SERVER_ADDR")]
    addr: Option<String>,

    /// Override the model endpoint
    #[arg(long, env = "PREDICTOR_ENDPOINT")]
    endpoint: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the form page and JSON API (default)
    Serve,

    /// Run one prediction and print the report
    Predict {
        /// Reactor temperature (K)
        #[arg(long)]
        temperature: Option<f64>,
        /// Reactor pressure (bar)
        #[arg(long)]
        pressure: Option<f64>,
        /// First-stage residence time (s)
        #[arg(long)]
        residence_time_1: Option<f64>,
        /// Second-stage residence time (s)
        #[arg(long)]
        residence_time_2: Option<f64>,
        /// Override the model endpoint
        #[arg(long, env = "PREDICTOR_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Parse and validate a config file, then print the effective config
    CheckConfig {
        /// Config file (default: ./predictor_config.toml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn load_config(endpoint: Option<String>) -> Result<Arc<AppConfig>> {
    let mut config = AppConfig::load().context("Failed to load predictor configuration")?;
    if let Some(endpoint) = endpoint {
        config.prediction.endpoint = endpoint;
    }
    config.validate().context("Invalid predictor configuration")?;
    Ok(Arc::new(config))
}

fn build_service(config: &Arc<AppConfig>) -> Result<SubmissionService> {
    let client = HttpPredictionClient::from_config(&config.prediction)
        .context("Failed to build prediction HTTP client")?;
    Ok(SubmissionService::new(Arc::new(client), Arc::clone(config)))
}

// ============================================================================
// Subcommands
// ============================================================================

async fn run_server(args: ServeArgs) -> Result<()> {
    let config = load_config(args.endpoint)?;
    let server_addr = args.addr.unwrap_or_else(|| config.server.addr.clone());
    let service = build_service(&config)?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Methanol Synthesis Yield Predictor");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        "Model: {} (timeout {}s)",
        config.prediction.endpoint, config.prediction.timeout_secs
    );

    let app = create_app(ApiState::new(service));
    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind {server_addr}"))?;
    info!("🌐 Form page: http://{}", server_addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("✓ Shutdown complete");
    Ok(())
}

async fn run_predict(form: ConditionsForm, endpoint: Option<String>) -> Result<bool> {
    let config = load_config(endpoint)?;
    let service = build_service(&config)?;
    let outcome = service.submit(&form).await;
    print!("{}", render_outcome(&outcome));
    Ok(outcome.report().is_some())
}

fn run_check_config(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    let (config, warnings) = AppConfig::load_from_file_with_warnings(&path)
        .with_context(|| format!("Config check failed for {}", path.display()))?;
    for w in &warnings {
        println!("warning: {w}");
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let result = match args.command {
        None | Some(SubCommand::Serve) => run_server(args.serve).await.map(|()| true),
        Some(SubCommand::Predict {
            temperature,
            pressure,
            residence_time_1,
            residence_time_2,
            endpoint,
        }) => {
            let form = ConditionsForm {
                temperature,
                pressure,
                residence_time_1,
                residence_time_2,
            };
            run_predict(form, endpoint).await
        }
        Some(SubCommand::CheckConfig { path }) => run_check_config(path).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
