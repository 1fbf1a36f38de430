//! Error types for the store layer
//!
//! Every failure coming out of the SQLite pool, its migrations or its
//! configuration is reported as a [`DatabaseError`].

use std::{io, path::PathBuf};

use sqlx::{Error as SqlxError, migrate::MigrateError};
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The SQLite database could not be opened
    #[error("Cannot open SQLite database: {0}")]
    Connection(#[source] SqlxError),

    /// A statement or transaction failed
    #[error("SQLite query failed: {0}")]
    Query(#[source] SqlxError),

    /// The embedded schema could not be applied
    #[error("Schema migration failed: {0}")]
    Migration(#[from] MigrateError),

    /// `DATABASE_URL` is not a SQLite URL sqlx understands
    #[error("Invalid SQLite URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The directory holding the database file could not be created
    #[error("Cannot create database directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
