/// Genius lyrics provider
///
/// API Flow:
/// 1. Search: /search?q={title artist} → song hits with title, primary artist and page URL
/// 2. Lyrics: the song page itself is scraped, Genius has no lyrics endpoint
use crate::{
    error::{AppError, AppResult},
    models::{GeniusEnvelope, GeniusHit, GeniusSearchResponse, GeniusSong, Song, SongQuery},
    services::providers::LyricsProvider,
};
use reqwest::Client as HttpClient;
use scraper::{ElementRef, Html, Selector};

const USER_AGENT: &str = concat!("lyrics-api/", env!("CARGO_PKG_VERSION"));
const LYRICS_CONTAINER: &str = r#"div[data-lyrics-container="true"]"#;
const EXCLUDE_ATTR: &str = "data-exclude-from-selection";

/// Titles containing any of these are pages about a song, not lyrics
const NON_SONG_TERMS: &[&str] = &[
    "track list",
    "tracklist",
    "album art",
    "liner notes",
    "booklet",
    "credits",
    "interview",
    "skit",
    "instrumental",
    "setlist",
];

#[derive(Clone)]
pub struct GeniusProvider {
    http_client: HttpClient,
    access_token: String,
    api_url: String,
}

impl GeniusProvider {
    pub fn new(access_token: String, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(3))
            .build()?;

        Ok(Self {
            http_client,
            access_token,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Runs a free-text search and returns the raw hits
    async fn search(&self, term: &str) -> AppResult<Vec<GeniusHit>> {
        let url = format!("{}/search", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("q", term)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Genius API returned status {}: {}",
                status, body
            )));
        }

        let envelope: GeniusEnvelope<GeniusSearchResponse> = response.json().await?;
        Ok(envelope.response.hits)
    }

    /// Downloads a song page and extracts its lyrics
    async fn fetch_lyrics(&self, page_url: &str) -> AppResult<String> {
        let response = self.http_client.get(page_url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Genius page {} returned status {}",
                page_url,
                response.status()
            )));
        }

        let html = response.text().await?;
        let lyrics = extract_lyrics(&html)?;
        tracing::debug!(url = %page_url, lyrics_len = lyrics.len(), "Lyrics page scraped");
        Ok(lyrics)
    }
}

#[async_trait::async_trait]
impl LyricsProvider for GeniusProvider {
    async fn search_song(&self, query: &SongQuery) -> AppResult<Option<Song>> {
        let term = query.search_term();
        let hits = self.search(&term).await?;

        tracing::debug!(term = %term, hits = hits.len(), provider = "genius", "Search completed");

        let Some(song) = select_song(&hits, query) else {
            return Ok(None);
        };

        if !is_lyrics(song) {
            tracing::debug!(genius_id = song.id, title = %song.title, "Best match has no lyrics");
            return Ok(None);
        }

        let lyrics = self.fetch_lyrics(&song.url).await?;
        if lyrics.is_empty() {
            tracing::debug!(
                genius_id = song.id,
                title = %song.title,
                url = %song.url,
                "Lyrics page had no lyrics"
            );
            return Ok(None);
        }

        Ok(Some(Song {
            title: song.title.clone(),
            artist: song.primary_artist.name.clone(),
            lyrics,
            url: song.url.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "genius"
    }
}

/// Picks the best hit for a query
///
/// An exact (normalized) title match wins, scoped to the artist when one was
/// given. Otherwise the first hit that looks like real lyrics, otherwise none.
fn select_song<'a>(hits: &'a [GeniusHit], query: &SongQuery) -> Option<&'a GeniusSong> {
    let wanted_title = normalize(&query.title);
    let wanted_artist = query.artist.as_deref().map(normalize);

    let songs: Vec<&GeniusSong> = hits
        .iter()
        .filter(|hit| hit.hit_type == "song")
        .map(|hit| &hit.result)
        .collect();

    let exact = songs.iter().copied().find(|song| {
        normalize(&song.title) == wanted_title
            && wanted_artist
                .as_deref()
                .map_or(true, |artist| normalize(&song.primary_artist.name).contains(artist))
    });

    exact.or_else(|| songs.iter().copied().find(|song| is_lyrics(song)))
}

/// Whether a hit points at an actual lyrics page
fn is_lyrics(song: &GeniusSong) -> bool {
    if song.instrumental || song.lyrics_state.as_deref() != Some("complete") {
        return false;
    }
    let title = song.title.to_lowercase();
    !NON_SONG_TERMS.iter().any(|term| title.contains(term))
}

/// Lowercases, drops ASCII punctuation and zero-width spaces, trims
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .map(|c| if c == '\u{200b}' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Extracts the lyrics text from a Genius song page
///
/// Line breaks are kept, annotations marked as excluded from selection are
/// dropped, and the containers the page splits a song into are rejoined.
fn extract_lyrics(html: &str) -> AppResult<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LYRICS_CONTAINER)
        .map_err(|e| AppError::Parse(format!("invalid lyrics selector: {:?}", e)))?;

    let chunks: Vec<String> = document
        .select(&selector)
        .map(|container| {
            let mut text = String::new();
            collect_text(container, &mut text);
            text.trim().to_string()
        })
        .filter(|text| !text.is_empty())
        .collect();

    Ok(chunks.join("\n"))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let value = child_element.value();
            if value.name() == "br" {
                out.push('\n');
            } else if value.attr(EXCLUDE_ATTR) != Some("true") {
                collect_text(child_element, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeniusArtist;
    use axum::{
        extract::{Query, State},
        http::{header::AUTHORIZATION, HeaderMap, StatusCode},
        response::{Html as HtmlBody, IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    const TOKEN: &str = "test-token";
    const PAGE: &str = r#"<html><body>
        <div data-lyrics-container="true">Yesterday<br>All my troubles seemed so far away</div>
    </body></html>"#;

    fn hit(title: &str, artist: &str) -> GeniusHit {
        GeniusHit {
            hit_type: "song".to_string(),
            result: GeniusSong {
                id: 1,
                title: title.to_string(),
                url: format!("https://genius.com/{}", title.replace(' ', "-")),
                lyrics_state: Some("complete".to_string()),
                instrumental: false,
                primary_artist: GeniusArtist {
                    name: artist.to_string(),
                },
            },
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Don't Stop Me Now! "), "dont stop me now");
        assert_eq!(normalize("Hey\u{200b}Jude"), "hey jude");
        assert_eq!(normalize("Yesterday"), normalize("yesterday."));
    }

    #[test]
    fn test_select_exact_title_match() {
        let hits = vec![
            hit("Yesterday (Remastered)", "The Beatles"),
            hit("Yesterday", "The Beatles"),
        ];
        let query = SongQuery::new("yesterday", None);
        let song = select_song(&hits, &query).unwrap();
        assert_eq!(song.title, "Yesterday");
    }

    #[test]
    fn test_select_exact_match_scoped_to_artist() {
        let hits = vec![hit("Hurt", "Nine Inch Nails"), hit("Hurt", "Johnny Cash")];
        let query = SongQuery::new("Hurt", Some("johnny cash"));
        let song = select_song(&hits, &query).unwrap();
        assert_eq!(song.primary_artist.name, "Johnny Cash");
    }

    #[test]
    fn test_select_falls_back_to_first_lyrics_hit() {
        let hits = vec![
            hit("Abbey Road (Tracklist)", "The Beatles"),
            hit("Come Together", "The Beatles"),
        ];
        let query = SongQuery::new("abbey road", None);
        let song = select_song(&hits, &query).unwrap();
        assert_eq!(song.title, "Come Together");
    }

    #[test]
    fn test_select_ignores_non_song_hits() {
        let mut other = hit("Yesterday", "The Beatles");
        other.hit_type = "video".to_string();
        let query = SongQuery::new("Yesterday", None);
        assert!(select_song(&[other], &query).is_none());
    }

    #[test]
    fn test_select_no_hits() {
        let query = SongQuery::new("Yesterday", None);
        assert!(select_song(&[], &query).is_none());
    }

    #[test]
    fn test_is_lyrics() {
        assert!(is_lyrics(&hit("Yesterday", "The Beatles").result));
        assert!(!is_lyrics(&hit("Abbey Road Liner Notes", "The Beatles").result));

        let mut pending = hit("Yesterday", "The Beatles").result;
        pending.lyrics_state = Some("unreleased".to_string());
        assert!(!is_lyrics(&pending));

        let mut instrumental = hit("Flying", "The Beatles").result;
        instrumental.instrumental = true;
        assert!(!is_lyrics(&instrumental));
    }

    #[test]
    fn test_extract_lyrics() {
        let html = r#"
            <html><body>
              <div data-lyrics-container="true">
                <div data-exclude-from-selection="true">12 Contributors</div>[Verse 1]<br>Yesterday<br><a href="/x"><span>All my troubles seemed so far away</span></a>
              </div>
              <div class="ad">advert</div>
              <div data-lyrics-container="true">Now it looks as though they're here to stay<br>Oh, I believe in yesterday</div>
            </body></html>
        "#;

        let lyrics = extract_lyrics(html).unwrap();
        assert_eq!(
            lyrics,
            "[Verse 1]\nYesterday\nAll my troubles seemed so far away\n\
             Now it looks as though they're here to stay\nOh, I believe in yesterday"
        );
    }

    #[test]
    fn test_extract_lyrics_missing_container() {
        let html = "<html><body><p>Lyrics for this song have yet to be released.</p></body></html>";
        assert_eq!(extract_lyrics(html).unwrap(), "");
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let provider =
            GeniusProvider::new("token".to_string(), "https://api.genius.com/".to_string())
                .unwrap();
        assert_eq!(provider.api_url, "https://api.genius.com");
        assert_eq!(provider.name(), "genius");
    }

    /// Serves `routes` on an ephemeral port; the state is the server's base URL
    async fn serve(routes: Router<String>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let app = routes.with_state(base.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        base
    }

    fn search_body(base: &str, lyrics_state: &str) -> Value {
        json!({
            "meta": {"status": 200},
            "response": {
                "hits": [{
                    "type": "song",
                    "result": {
                        "id": 2236,
                        "title": "Yesterday",
                        "url": format!("{}/The-beatles-yesterday-lyrics", base),
                        "lyrics_state": lyrics_state,
                        "primary_artist": {"name": "The Beatles"}
                    }
                }]
            }
        })
    }

    async fn authorized_search(
        State(base): State<String>,
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        let expected_auth = format!("Bearer {}", TOKEN);
        if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected_auth.as_str())
        {
            return (StatusCode::UNAUTHORIZED, "missing token").into_response();
        }
        if params.get("q").map(String::as_str) != Some("Yesterday The Beatles") {
            return (StatusCode::BAD_REQUEST, "unexpected search term").into_response();
        }
        Json(search_body(&base, "complete")).into_response()
    }

    async fn unreleased_search(State(base): State<String>) -> Json<Value> {
        Json(search_body(&base, "unreleased"))
    }

    async fn complete_search(State(base): State<String>) -> Json<Value> {
        Json(search_body(&base, "complete"))
    }

    async fn lyrics_page() -> HtmlBody<&'static str> {
        HtmlBody(PAGE)
    }

    async fn empty_page() -> HtmlBody<&'static str> {
        HtmlBody("<html><body><p>Lyrics for this song have yet to be released.</p></body></html>")
    }

    fn provider(base: &str) -> GeniusProvider {
        GeniusProvider::new(TOKEN.to_string(), base.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_search_song_found() {
        let base = serve(
            Router::new()
                .route("/search", get(authorized_search))
                .route("/The-beatles-yesterday-lyrics", get(lyrics_page)),
        )
        .await;

        let song = provider(&base)
            .search_song(&SongQuery::new("Yesterday", Some("The Beatles")))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(song.title, "Yesterday");
        assert_eq!(song.artist, "The Beatles");
        assert_eq!(song.lyrics, "Yesterday\nAll my troubles seemed so far away");
        assert_eq!(song.url, format!("{}/The-beatles-yesterday-lyrics", base));
    }

    #[tokio::test]
    async fn test_search_error_status_is_external_api_error() {
        let base = serve(Router::new().route(
            "/search",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        ))
        .await;

        let result = provider(&base)
            .search_song(&SongQuery::new("Yesterday", None))
            .await;

        match result {
            Err(AppError::ExternalApi(message)) => {
                assert!(message.contains("503"));
                assert!(message.contains("down"));
            }
            other => panic!("expected ExternalApi error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_search_is_http_client_error() {
        let base = serve(
            Router::new().route("/search", get(|| async { "<html>not json</html>" })),
        )
        .await;

        let result = provider(&base)
            .search_song(&SongQuery::new("Yesterday", None))
            .await;

        assert!(matches!(result, Err(AppError::HttpClient(_))));
    }

    #[tokio::test]
    async fn test_selected_hit_without_lyrics_is_not_found() {
        // No page route: a page fetch would surface as an error
        let base = serve(Router::new().route("/search", get(unreleased_search))).await;

        let result = provider(&base)
            .search_song(&SongQuery::new("Yesterday", None))
            .await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_empty_lyrics_page_is_not_found() {
        let base = serve(
            Router::new()
                .route("/search", get(complete_search))
                .route("/The-beatles-yesterday-lyrics", get(empty_page)),
        )
        .await;

        let result = provider(&base)
            .search_song(&SongQuery::new("Yesterday", None))
            .await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_missing_lyrics_page_is_external_api_error() {
        let base = serve(Router::new().route("/search", get(complete_search))).await;

        let result = provider(&base)
            .search_song(&SongQuery::new("Yesterday", None))
            .await;

        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
