//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the definitions directory
//! - Start the debouncer and attach the directory watcher
//! - Scan the directory into the index
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: an unreadable directory or unattachable watcher is fatal
//! - The watcher attaches before the scan, so no write falls between them;
//!   files seen by both are simply parsed twice
//! - Listeners start last (traffic only when the index is loaded)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{ConfigError, MockConfig};
use crate::http::MockServer;
use crate::observability::metrics;
use crate::routing::RouteIndex;
use crate::watcher::{
    load_directory, Debouncer, DirectoryWatcher, ReloadHandler, ScanError, WatchError,
};

/// A fatal error before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    DirectoryRead(#[from] ScanError),

    #[error(transparent)]
    Watch(#[from] WatchError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A fully initialized mock server, ready to serve.
pub struct Application {
    index: Arc<RouteIndex>,
    api_path: PathBuf,
    listener: TcpListener,
    server: MockServer,
    watcher: DirectoryWatcher,
}

impl Application {
    /// Start watching, load definitions, and bind the listener.
    pub async fn build(config: &MockConfig) -> Result<Self, StartupError> {
        if config.observability.metrics_enabled {
            if let Some(addr) = config.observability.metrics_socket_addr() {
                metrics::init_metrics(addr);
            }
        }

        let api_path = resolve_directory(&config.api_path)?;
        let index = Arc::new(RouteIndex::new());

        let (debouncer, _task) =
            Debouncer::spawn(config.watcher.debounce(), ReloadHandler::new(index.clone()));
        let watcher = DirectoryWatcher::start(&api_path, debouncer)?;

        let summary = load_directory(&api_path, &index)?;
        tracing::info!(
            path = %api_path.display(),
            files = summary.updated,
            failed = summary.failed,
            routes = index.route_count(),
            "Definitions loaded"
        );
        for file in index.files() {
            tracing::debug!(file = %file, "Serving definitions");
        }

        let address = config.listener.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind { address, source })?;

        let server = MockServer::new(index.clone());

        Ok(Self {
            index,
            api_path,
            listener,
            server,
            watcher,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    pub fn index(&self) -> Arc<RouteIndex> {
        self.index.clone()
    }

    /// Canonical definitions directory in use.
    pub fn api_path(&self) -> &Path {
        &self.api_path
    }

    /// Serve until `shutdown` fires. The watcher stays attached until then.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> Result<(), StartupError> {
        let Self {
            listener,
            server,
            watcher,
            ..
        } = self;

        let result = server.run(listener, shutdown).await.map_err(StartupError::Serve);
        tracing::debug!(path = %watcher.path().display(), "Detaching definitions watcher");
        drop(watcher);
        result
    }
}

/// Canonicalize the definitions directory so watcher event paths and scan
/// paths share one form.
fn resolve_directory(path: &Path) -> Result<PathBuf, ScanError> {
    std::fs::canonicalize(path).map_err(|source| ScanError {
        path: path.to_path_buf(),
        source,
    })
}
