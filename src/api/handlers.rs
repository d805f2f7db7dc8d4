use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    middleware::RequestId,
    models::{LyricsRequest, LyricsResponse},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Handler for the lyrics lookup endpoint
///
/// Always answers 200: a missing title, an unreadable body, a miss and a
/// provider failure each produce a canned message in the `lyrics` field.
pub async fn get_lyrics(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<LyricsRequest>, JsonRejection>,
) -> Json<LyricsResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(
                request_id = %request_id,
                error = %rejection,
                "Malformed lyrics request"
            );
            return Json(state.lyrics.invalid_request());
        }
    };

    let Some(song_title) = request.title() else {
        tracing::info!(request_id = %request_id, "Lyrics request without song title");
        return Json(state.lyrics.missing_title());
    };

    tracing::info!(
        request_id = %request_id,
        song_title = %song_title,
        artist = ?request.artist(),
        "Processing lyrics request"
    );

    Json(state.lyrics.get_lyrics(song_title, request.artist()).await)
}
