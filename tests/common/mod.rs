//! Shared utilities for integration tests.

use waypost::config::ServerConfig;
use waypost::{Router, ServerHandle};

/// Router bound to loopback, for use with [`start`].
pub fn router() -> Router {
    Router::with_config(ServerConfig {
        host: "127.0.0.1".into(),
        ..ServerConfig::default()
    })
}

/// Start `router` on an ephemeral port.
pub async fn start(router: Router) -> ServerHandle {
    router.listen(0).await.expect("server should bind")
}

/// Client that never reuses connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub fn url(server: &ServerHandle, path: &str) -> String {
    format!("http://{}{}", server.local_addr(), path)
}
