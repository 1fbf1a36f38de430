//! Data manager: the seam between request handlers and the store

use async_trait::async_trait;

use crate::{
    error::DataResult,
    models::{Movie, MovieChanges, NewMovie, NewUser, User},
};

pub mod sqlite;

pub use sqlite::SqliteDataManager;

/// Operations the handlers need from a user/movie store
///
/// Every mutating operation is all-or-nothing: it either commits completely
/// or leaves the store untouched and returns the error.
#[async_trait]
pub trait DataManager: Send + Sync {
    /// All users, ordered by id
    async fn get_all_users(&self) -> DataResult<Vec<User>>;

    async fn get_user(&self, user_id: i64) -> DataResult<Option<User>>;

    /// Movies in a user's collection, ordered by id
    async fn get_user_movies(&self, user_id: i64) -> DataResult<Vec<Movie>>;

    async fn get_movie(&self, movie_id: i64) -> DataResult<Option<Movie>>;

    /// A movie, only if it is in the given user's collection
    async fn get_user_movie(&self, user_id: i64, movie_id: i64) -> DataResult<Option<Movie>>;

    async fn add_user(&self, new_user: &NewUser) -> DataResult<User>;

    /// Create a movie and link it to the user's collection
    async fn add_movie(&self, user_id: i64, new_movie: &NewMovie) -> DataResult<Movie>;

    async fn update_movie(&self, movie_id: i64, changes: &MovieChanges) -> DataResult<Movie>;

    /// Remove a movie along with every collection link to it
    async fn delete_movie(&self, movie_id: i64) -> DataResult<()>;
}
