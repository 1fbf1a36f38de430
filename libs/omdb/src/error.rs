use thiserror::Error;

#[derive(Debug, Error)]
pub enum OmdbError {
    /// OMDb answered but reported a failure, usually "Movie not found!"
    #[error("OMDb API error: {0}")]
    Api(String),

    #[error("Request failed with status code {0}")]
    Status(u16),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid OMDb response: {0}")]
    Json(#[from] serde_json::Error),
}

impl OmdbError {
    /// Whether OMDb itself answered with the failure.
    ///
    /// `false` means the service could not be reached or its answer could not
    /// be read at all.
    pub fn is_reported(&self) -> bool {
        matches!(self, OmdbError::Api(_) | OmdbError::Status(_))
    }
}
