//! Custom error types for the web service

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use omdb::OmdbError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Outcome of a data-manager operation that did not succeed
#[derive(Error, Debug)]
pub enum DataError {
    /// The referenced user or movie does not exist
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A required field is missing or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store failed; the transaction was rolled back
    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl DataError {
    pub fn user_not_found(id: i64) -> Self {
        DataError::NotFound { entity: "User", id }
    }

    pub fn movie_not_found(id: i64) -> Self {
        DataError::NotFound {
            entity: "Movie",
            id,
        }
    }
}

impl From<sqlx::Error> for DataError {
    fn from(e: sqlx::Error) -> Self {
        DataError::Store(DatabaseError::Query(e))
    }
}

/// Type alias for data-manager results
pub type DataResult<T> = Result<T, DataError>;

/// Errors of the JSON API, rendered as `{"error": ...}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Data-manager error
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Data(DataError::NotFound { entity, id }) => {
                warn!("{} {} not found", entity, id);
                (StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            ApiError::Data(DataError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Data(DataError::Store(e)) => {
                error!("Store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors of the HTML pages, rendered as plain text
#[derive(Error, Debug)]
pub enum PageError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Data(#[from] DataError),

    #[error("Metadata lookup failed: {0}")]
    Metadata(#[from] OmdbError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PageError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            PageError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            PageError::Data(DataError::NotFound { entity, id }) => {
                warn!("{} {} not found", entity, id);
                (StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            PageError::Data(DataError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            PageError::Data(DataError::Store(e)) => {
                error!("Store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred".to_string(),
                )
            }
            PageError::Metadata(OmdbError::Api(msg)) => (StatusCode::BAD_REQUEST, msg),
            PageError::Metadata(e) if e.is_reported() => (StatusCode::BAD_REQUEST, e.to_string()),
            PageError::Metadata(e) => {
                error!("Metadata lookup failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not reach the movie database".to_string(),
                )
            }
            PageError::Template(e) => {
                error!("Template error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(DataError::movie_not_found(9).to_string(), "Movie not found");
        assert_eq!(DataError::user_not_found(3).to_string(), "User not found");
    }

    #[test]
    fn test_api_status_codes() {
        let cases = [
            (ApiError::from(DataError::movie_not_found(1)), StatusCode::NOT_FOUND),
            (
                ApiError::from(DataError::Validation("Name is required".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(DataError::Store(DatabaseError::Configuration(
                    "boom".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::BadRequest("Title is required".to_string()), StatusCode::BAD_REQUEST),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_page_status_codes() {
        assert_eq!(
            PageError::from(OmdbError::Api("Movie not found!".to_string()))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PageError::from(OmdbError::Status(503)).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        let unreadable = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert_eq!(
            PageError::from(OmdbError::Json(unreadable))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
