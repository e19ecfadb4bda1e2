//! Waypost demo server.
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!     Client Request     │  ┌─────────┐   ┌────────────┐   ┌─────────┐  │
//!     ───────────────────┼─▶│  http   │──▶│ dispatcher │──▶│  route  │  │
//!                        │  │ server  │   │            │   │  table  │  │
//!                        │  └─────────┘   └─────┬──────┘   └─────────┘  │
//!                        │                      ▼                       │
//!     Client Response    │  ┌─────────┐   ┌────────────┐                │
//!     ◀──────────────────┼──│response │◀──│  handler   │                │
//!                        │  └─────────┘   └────────────┘                │
//!                        └──────────────────────────────────────────────┘
//! ```
//!
//! Routes:
//! - `GET /`, `GET /hi`, `GET /hi2` → `hi`
//! - `GET /h/:hi` → `Hi <hi>`
//! - `GET /rest/*` → `Rest`
//! - anything else → `Not found`

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use waypost::config::{load_config, WaypostConfig};
use waypost::lifecycle::wait_for_termination;
use waypost::observability::{logging, metrics};
use waypost::Router;

#[derive(Parser)]
#[command(name = "waypost")]
#[command(about = "Demo server for the waypost request router", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on. Overrides `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WaypostConfig::default(),
    };

    logging::init_logging(&config.logging)?;
    tracing::info!("waypost v{} starting", env!("CARGO_PKG_VERSION"));

    if config.metrics.enabled {
        let addr: SocketAddr = config.metrics.address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let port = cli.port.unwrap_or(config.server.port);
    tracing::info!(
        host = %config.server.host,
        port,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let server = Router::with_config(config.server.clone())
        .get("/", |_| "hi")
        .get("/hi", |_| "hi")
        .get("/hi2", |_| "hi")
        .get("/h/:hi", |ctx| format!("Hi {}", ctx.param("hi").unwrap_or_default()))
        .get("/rest/*", |_| "Rest")
        .fallback(|_| "Not found")
        .listen(port)
        .await?;

    tracing::info!(address = %server.local_addr(), "Listening at {}", server.local_addr());

    wait_for_termination().await;
    server.shutdown().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
