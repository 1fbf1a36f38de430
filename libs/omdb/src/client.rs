use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::OmdbError;

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    /// Create an OmdbClient with a reqwest Client.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create an OmdbClient whose requests give up after `timeout`.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the raw OMDb record for a title
    ///
    /// GET /?apikey={key}&t={title}
    pub async fn fetch_movie_data(&self, title: &str) -> crate::Result<Value> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
            .inspect_err(|e| error!("Unexpected error fetching movie data for '{}': {}", title, e))?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = interpret_response(status, &body);
        match &result {
            Ok(_) => info!("Successfully fetched data for: {}", title),
            Err(OmdbError::Api(message)) => warn!("OMDb API returned an error: {}", message),
            Err(e) => error!("OMDb API request for '{}' failed: {}", title, e),
        }
        result
    }
}

/// Turn an OMDb HTTP answer into the raw record or a reported error.
pub(crate) fn interpret_response(status: u16, body: &str) -> crate::Result<Value> {
    if status != 200 {
        return Err(OmdbError::Status(status));
    }

    let data: Value = serde_json::from_str(body)?;
    if data.get("Response").and_then(Value::as_str) == Some("True") {
        return Ok(data);
    }

    let message = data
        .get("Error")
        .and_then(Value::as_str)
        .unwrap_or("Movie not found!");
    Err(OmdbError::Api(message.to_string()))
}
