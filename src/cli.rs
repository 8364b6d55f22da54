//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_or_default, validate_config, ConfigError, MockConfig};

#[derive(Debug, Parser)]
#[command(name = "api-mock")]
#[command(about = "Mock HTTP server driven by hot-reloaded JSON definitions", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Path to the TOML configuration file (optional).
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Port to listen on.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory containing the *.json definition files.
    #[arg(short, long)]
    pub api_path: Option<PathBuf>,

    /// Quiet period in milliseconds before changed files are reloaded.
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Do not print the startup banner.
    #[arg(long)]
    pub no_logo: bool,

    /// Show version info and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}

impl Cli {
    /// Load the config file (defaults if absent), apply flag overrides and
    /// validate the result.
    pub fn resolve_config(&self) -> Result<MockConfig, ConfigError> {
        let config = self.apply(load_or_default(&self.config)?);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Apply flag overrides on top of `config`.
    pub fn apply(&self, mut config: MockConfig) -> MockConfig {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(api_path) = &self.api_path {
            config.api_path = api_path.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.watcher.debounce_ms = debounce_ms;
        }
        if self.no_logo {
            config.show_logo = false;
        }
        config
    }
}

/// Version details printed by `-v`.
pub fn version_info() -> String {
    format!(
        "{} {}\n\n• Target:  {}/{}\n• Website: {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_REPOSITORY"),
    )
}

/// Startup banner.
pub fn banner(address: &str, api_path: &str) -> String {
    format!(
        r#"
   __ _ _ __ (_)      _ __ ___   ___   ___| | __
  / _` | '_ \| |_____| '_ ` _ \ / _ \ / __| |/ /
 | (_| | |_) | |_____| | | | | | (_) | (__|   <
  \__,_| .__/|_|     |_| |_| |_|\___/ \___|_|\_\ v{}
       |_|
 serving {} on http://{}
"#,
        env!("CARGO_PKG_VERSION"),
        api_path,
        address
    )
}
