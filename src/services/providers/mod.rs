/// Lyrics provider abstraction
///
/// A provider resolves a title (optionally scoped to an artist) to a song with
/// its full lyrics. The lookup service depends only on this trait, so tests can
/// substitute a mock for the network-backed implementation.
use crate::{
    error::AppResult,
    models::{Song, SongQuery},
};

pub mod genius;

pub use genius::GeniusProvider;

/// Trait for lyrics search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Search for a song and fetch its lyrics
    ///
    /// Returns `Ok(None)` when the provider has no match.
    async fn search_song(&self, query: &SongQuery) -> AppResult<Option<Song>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
