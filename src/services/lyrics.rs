use std::sync::Arc;

use crate::{
    models::{LyricsResponse, SongQuery},
    services::{
        providers::LyricsProvider,
        responses::{CannedResponses, ResponseCategory},
    },
};

/// Artist reported when a lookup fails and the caller named none
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Title and artist reported when the request itself carried nothing usable
pub const UNKNOWN: &str = "Unknown";

/// Lyrics lookup service
///
/// Issues exactly one provider call per lookup and always produces a
/// success-shaped response: misses and failures become canned messages.
#[derive(Clone)]
pub struct LyricsService {
    provider: Arc<dyn LyricsProvider>,
    responses: CannedResponses,
}

impl LyricsService {
    pub fn new(provider: Arc<dyn LyricsProvider>, responses: CannedResponses) -> Self {
        Self {
            provider,
            responses,
        }
    }

    /// Looks up a song, scoped to the artist when one is given
    pub async fn get_lyrics(&self, song_title: &str, artist: Option<&str>) -> LyricsResponse {
        let query = SongQuery::new(song_title, artist);
        let provider = self.provider.name();

        match self.provider.search_song(&query).await {
            Ok(Some(song)) => {
                tracing::info!(
                    title = %song.title,
                    artist = %song.artist,
                    provider,
                    "Lyrics found"
                );
                LyricsResponse::from(song)
            }
            Ok(None) => {
                tracing::info!(
                    title = %query.title,
                    artist = ?query.artist,
                    provider,
                    "Lyrics not found"
                );
                self.fallback(ResponseCategory::NotFound, query)
            }
            Err(e) => {
                tracing::warn!(
                    title = %query.title,
                    artist = ?query.artist,
                    provider,
                    error = %e,
                    "Lyrics lookup failed"
                );
                self.fallback(ResponseCategory::Error, query)
            }
        }
    }

    /// Reply for a request without a song title
    pub fn missing_title(&self) -> LyricsResponse {
        LyricsResponse::new(self.responses.compose(ResponseCategory::NoTitle), UNKNOWN, UNKNOWN)
    }

    /// Reply for a request body that could not be read
    pub fn invalid_request(&self) -> LyricsResponse {
        LyricsResponse::new(self.responses.compose(ResponseCategory::Error), UNKNOWN, UNKNOWN)
    }

    fn fallback(&self, category: ResponseCategory, query: SongQuery) -> LyricsResponse {
        tracing::debug!(category = %category, title = %query.title, "Answering with canned reply");
        LyricsResponse::new(
            self.responses.compose(category),
            query.title,
            query.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        )
    }
}
