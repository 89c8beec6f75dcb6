//! OSF Files Server — versioned project file hosting.
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use osf_core::config::AppConfig;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "osf-files-server", version, about = "Versioned project file server")]
struct Cli {
    /// Directory holding `default.toml` and per-environment overlays.
    #[arg(long, default_value = "config", env = "OSF_CONFIG_DIR")]
    config: String,

    /// Environment overlay to apply (`{config}/{env}.toml`).
    #[arg(long, default_value = "development", env = "OSF_ENV")]
    env: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        config_dir = %cli.config,
        env = %cli.env,
        "Starting OSF files server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = osf_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
