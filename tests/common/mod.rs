//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use feed_api::config::ApiConfig;
use feed_api::lifecycle::{startup, Shutdown};
use tokio::task::JoinHandle;

pub const API_KEY: &str = "integration-key";

/// A running server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api/v1{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Config with the test key and an ephemeral bind address.
pub fn test_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.auth.api_key = API_KEY.into();
    config
}

pub async fn start_server(config: ApiConfig) -> TestServer {
    let (server, listener) = startup::prepare(config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
