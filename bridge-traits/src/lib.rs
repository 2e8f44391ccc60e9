//! # Host Bridge Traits
//!
//! Capability traits the catalog core depends on but does not implement
//! itself. Concrete adapters live in `bridge-desktop`; tests substitute
//! in-process doubles.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Outbound HTTP used by the enrichment source
//! - [`Clock`](time::Clock) - Time source, injectable for deterministic cache expiry tests
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Adapters
//! convert their native errors into it and keep the original message.
//!
//! ## Thread Safety
//!
//! Every trait requires `Send + Sync`; handles are shared across request
//! workers behind `Arc`.

pub mod error;
pub mod http;
pub mod time;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use time::{Clock, LogLevel, SystemClock};
