//! Core service façade and bootstrap helpers.
//!
//! This crate wires the song store, the optional cache and the enrichment
//! source into [`SongService`], the single entry point the transport layer
//! talks to. Hosts typically call [`bootstrap`] with a validated
//! [`core_runtime::config::ServiceConfig`]; tests assemble a service directly
//! from [`CoreDependencies`].

pub mod bootstrap;
pub mod error;
pub mod service;

pub use bootstrap::{bootstrap, CoreDependencies};
pub use error::{CoreError, ErrorKind, Result};
pub use service::SongService;

pub use core_library::{FilterKey, Page, PageRequest, Song, SongFilter, SongRepository};
pub use core_library::repositories::{DEFAULT_SONGS_PAGE_SIZE, DEFAULT_VERSES_PAGE_SIZE};
