//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use api_mock::{Application, MockConfig, Shutdown};
use serde_json::{json, Value};

/// One definition record as it appears in a file.
pub fn record(method: &str, url: &str, code: u16, delay: u64, body: Value) -> Value {
    json!({
        "request": {"url": url, "method": method},
        "response": {"code": code, "delay": delay, "body": body}
    })
}

/// Write a definition file containing `records`.
pub fn write_definitions(dir: &Path, name: &str, records: Vec<Value>) {
    std::fs::write(dir.join(name), Value::Array(records).to_string()).unwrap();
}

/// Start a server on an ephemeral port serving `dir`.
pub async fn start_server(dir: &Path, debounce_ms: u64) -> (SocketAddr, Shutdown) {
    let mut config = MockConfig::default();
    config.api_path = dir.to_path_buf();
    config.listener.bind_address = "127.0.0.1".to_string();
    config.listener.port = 0;
    config.watcher.debounce_ms = debounce_ms;

    let app = Application::build(&config).await.unwrap();
    let addr = app.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = app.run(server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Poll `check` until it returns true or `timeout` elapses.
#[allow(dead_code)]
pub async fn eventually<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check().await {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

/// Issue a request and return status and parsed JSON body.
pub async fn fetch(client: &reqwest::Client, method: &str, url: &str) -> (u16, Value) {
    let method = reqwest::Method::from_bytes(method.as_bytes()).unwrap();
    let res = client.request(method, url).send().await.expect("server unreachable");
    let status = res.status().as_u16();
    let body = res.json::<Value>().await.unwrap();
    (status, body)
}
