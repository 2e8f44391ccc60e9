//! # Desktop Bridge Implementations
//!
//! Native implementations of the bridge traits for server and desktop
//! hosts (macOS, Windows, Linux).
//!
//! - `HttpClient` using `reqwest` with rustls
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let http_client = Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(10))?);
//! ```

mod http;

pub use http::ReqwestHttpClient;
