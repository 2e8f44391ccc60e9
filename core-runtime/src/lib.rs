//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the song catalog:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the service and server
//! crates depend on. It establishes the logging conventions and the
//! environment-driven configuration used throughout the system.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
