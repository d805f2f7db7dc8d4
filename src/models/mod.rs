use serde::{Deserialize, Serialize};

/// Inbound body of `POST /api/lyrics`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LyricsRequest {
    #[serde(default)]
    pub song_title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}

impl LyricsRequest {
    /// Requested title, if one was actually supplied
    pub fn title(&self) -> Option<&str> {
        non_empty(self.song_title.as_deref())
    }

    /// Requested artist, if one was actually supplied
    pub fn artist(&self) -> Option<&str> {
        non_empty(self.artist.as_deref())
    }
}

/// Treats empty strings as absent; whitespace is passed through as given
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Normalized lyrics lookup result returned to the client
///
/// `success` is always true: failures are reported through the `lyrics` text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LyricsResponse {
    pub success: bool,
    pub lyrics: String,
    pub title: String,
    pub artist: String,
}

impl LyricsResponse {
    pub fn new(
        lyrics: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            lyrics: lyrics.into(),
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl From<Song> for LyricsResponse {
    fn from(song: Song) -> Self {
        Self::new(song.lyrics, song.title, song.artist)
    }
}

/// A song resolved by a lyrics provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    /// Provider page the lyrics were taken from
    pub url: String,
}

/// What to search a provider for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub title: String,
    pub artist: Option<String>,
}

impl SongQuery {
    pub fn new(title: impl Into<String>, artist: Option<&str>) -> Self {
        Self {
            title: title.into(),
            artist: non_empty(artist).map(str::to_string),
        }
    }

    /// Free-text search term: the title, followed by the artist when scoped
    pub fn search_term(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} {}", self.title, artist).trim().to_string(),
            None => self.title.trim().to_string(),
        }
    }
}

// ============================================================================
// Genius API Types
// ============================================================================

/// Envelope of every Genius API response
#[derive(Debug, Clone, Deserialize)]
pub struct GeniusEnvelope<T> {
    pub response: T,
}

/// Body of GET /search
#[derive(Debug, Clone, Deserialize)]
pub struct GeniusSearchResponse {
    #[serde(default)]
    pub hits: Vec<GeniusHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeniusHit {
    #[serde(rename = "type")]
    pub hit_type: String,
    pub result: GeniusSong,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeniusSong {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub lyrics_state: Option<String>,
    #[serde(default)]
    pub instrumental: bool,
    pub primary_artist: GeniusArtist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeniusArtist {
    pub name: String,
}
