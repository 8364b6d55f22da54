//! api-mock
//!
//! Serves canned HTTP responses from JSON definition files and reloads them
//! when the directory changes.
//!
//! # Architecture Overview
//!
//! ```text
//!   *.json ──scan──┐                      ┌──────────────┐
//!                  ├──▶ definitions ──▶   │  RouteIndex  │ ◀── http dispatch ◀── Client
//!   notify ──▶ debounce ──▶ reload ──▶    │ (RwLock map) │
//!                                         └──────────────┘
//! ```

use clap::Parser;

use api_mock::cli::{banner, version_info, Cli};
use api_mock::lifecycle::signals::spawn_signal_handler;
use api_mock::lifecycle::{Application, Shutdown};
use api_mock::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.version {
        print!("{}", version_info());
        return Ok(());
    }

    let config = cli.resolve_config()?;
    init_logging(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "api-mock starting");
    tracing::info!(
        address = %config.listener.address(),
        api_path = %config.api_path.display(),
        debounce_ms = config.watcher.debounce_ms,
        "Configuration loaded"
    );

    let app = match Application::build(&config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    if config.show_logo {
        println!(
            "{}",
            banner(&app.local_addr()?.to_string(), &app.api_path().display().to_string())
        );
    }

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    app.run(shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
