use std::sync::Arc;

use crate::services::{CannedResponses, LyricsProvider, LyricsService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub lyrics: Arc<LyricsService>,
}

impl AppState {
    /// Creates state around a provider, with randomly chosen canned replies
    pub fn new(provider: Arc<dyn LyricsProvider>) -> Self {
        Self::with_responses(provider, CannedResponses::default())
    }

    /// Creates state with an explicit canned response table
    pub fn with_responses(provider: Arc<dyn LyricsProvider>, responses: CannedResponses) -> Self {
        Self {
            lyrics: Arc::new(LyricsService::new(provider, responses)),
        }
    }
}
