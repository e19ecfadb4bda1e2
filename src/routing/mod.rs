//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     (method, path spec, handler)
//!     → table.rs (literal → exact map, `:`/`*` → pattern list)
//!     → pattern.rs (compile segments)
//!     → Freeze as immutable RouteTable
//!
//! Incoming Request (method, path):
//!     → dispatcher.rs
//!     → table.rs (exact lookup, else ordered pattern scan, else fallback)
//!     → handler invocation
//!     → reply coercion onto the response
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex, no trie: a linear segment walk per candidate
//! - Exact routes beat patterns; among patterns, first registered wins
//! - Explicit fallback (404 by default) rather than a silent default

pub mod dispatcher;
pub mod method;
pub mod pattern;
pub mod table;

pub use dispatcher::{DispatchError, Dispatcher};
pub use method::{Method, UnsupportedMethod};
pub use pattern::{Pattern, REST_PARAM};
pub use table::{MatchKind, PatternRoute, Resolution, RouteTable, RouteTableBuilder};
