use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("geometry decode error: {0}")]
    Geometry(#[from] inondable_core::CoreError),
}
