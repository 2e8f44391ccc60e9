//! # Repository Pattern Implementation
//!
//! Repository traits and implementations for data access.
//!
//! ## Architecture
//!
//! - Traits define the interface for each repository
//! - SQLite implementations use sqlx for async database access
//! - All operations return `Result<T>` for error handling
//! - Pagination is supported via the `Page<T>` wrapper
//!
//! ## Available Repositories
//!
//! - `SongRepository` - Songs with filtered listing and verse pagination

pub mod pagination;
pub mod song;

pub use pagination::{Page, PageRequest, DEFAULT_SONGS_PAGE_SIZE, DEFAULT_VERSES_PAGE_SIZE};
pub use song::{SongRepository, SqliteSongRepository};
