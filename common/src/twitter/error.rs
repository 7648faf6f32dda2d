#[derive(Debug, thiserror::Error)]
pub enum TwitterError {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Unauthorized, check the bearer token")]
    Unauthorized,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Failed to read fixture: {0}")]
    Fixture(#[from] std::io::Error),

    #[error("Failed to decode fixture: {0}")]
    Json(#[from] serde_json::Error),
}
