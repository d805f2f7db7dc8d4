/// Errors raised while talking to a lyrics provider
///
/// None of these reach the HTTP layer: the lookup service logs them and
/// answers with a canned message instead.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type AppResult<T> = Result<T, AppError>;
