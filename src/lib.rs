//! Song catalog façade crate.
//!
//! Re-exports the service surface so hosts can depend on `song-catalog`
//! alone. Enable the `server` feature to also pull in the axum transport.

pub use core_cache::{song_key, CacheLookup, DisabledSongCache, InMemorySongCache, SongCache};
pub use core_library::{FilterKey, Page, PageRequest, Song, SongFilter, SongRepository};
pub use core_service::{bootstrap, CoreDependencies, CoreError, ErrorKind, SongService};

#[cfg(feature = "server")]
pub use catalog_server::{create_router, run};
