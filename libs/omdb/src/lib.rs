//! Client for the OMDb movie database
//!
//! Looks movies up by title and normalizes the answer into a
//! [`MovieMetadata`] record.

mod client;
mod error;
mod models;
mod provider;

pub use client::{DEFAULT_BASE_URL, OmdbClient};
pub use error::OmdbError;
pub use models::{MovieMetadata, NOT_AVAILABLE, extract_movie_data};
pub use provider::MetadataProvider;

pub type Result<T> = std::result::Result<T, OmdbError>;
