//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + http produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (request counters, latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured filter
//! - Metrics are recorded by the HTTP layer only; the router core stays free
//!   of side effects beyond debug events
//! - Without an installed exporter, metric calls are no-ops

pub mod logging;
pub mod metrics;
