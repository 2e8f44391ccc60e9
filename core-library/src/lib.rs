//! # Song Store
//!
//! Owns the canonical song database and provides the repository used by the
//! service layer.
//!
//! ## Overview
//!
//! This crate manages:
//! - SQLite schema and migrations
//! - The `SongRepository` with filtering, ordering and pagination
//! - Full-text lyrics search using FTS5
//! - Verse segmentation of lyrics

pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

pub use error::{LibraryError, Result};
pub use models::Song;
pub use query::{Constraint, FilterKey, SongFilter};
pub use repositories::{Page, PageRequest, SongRepository, SqliteSongRepository};
