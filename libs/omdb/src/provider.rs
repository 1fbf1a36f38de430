//! Metadata provider trait definition

use async_trait::async_trait;

use crate::{MovieMetadata, OmdbClient, extract_movie_data};

/// Looks up normalized movie metadata by title.
///
/// The web service depends on this trait rather than on [`OmdbClient`]
/// directly so a different source can be plugged in.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup(&self, title: &str) -> crate::Result<MovieMetadata>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn lookup(&self, title: &str) -> crate::Result<MovieMetadata> {
        let raw = self.fetch_movie_data(title).await?;
        Ok(extract_movie_data(&raw))
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
