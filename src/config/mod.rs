//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WaypostConfig (validated, immutable)
//!     → server, logging and metrics setup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; routes are code, not config
//! - All fields have defaults to allow minimal (or absent) config files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LogFormat, LoggingConfig, MetricsConfig, ServerConfig, WaypostConfig};
pub use validation::{validate_config, ValidationError};
