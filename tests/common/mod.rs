//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use patriot_router::{HttpServer, Router, RouterConfig, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A router served over real TCP on an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub router: Arc<Router>,
    shutdown: Shutdown,
    handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger graceful shutdown and wait for the server task.
    pub async fn stop(self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        self.handle.await.expect("server task panicked")
    }
}

/// Start `router` behind the HTTP transport.
pub async fn spawn_server(config: &RouterConfig, router: Arc<Router>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config, router.clone());
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        router,
        shutdown,
        handle,
    }
}

/// A client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
