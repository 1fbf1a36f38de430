//! Domain models plus request and response payloads

pub mod movie;
pub mod user;

pub use movie::{
    AddMovieForm, CreateMovieRequest, CreateMovieResponse, Movie, MovieChanges, MovieResponse,
    NewMovie, UpdateMovieForm,
};
pub use user::{AddUserForm, NewUser, User, UserResponse};

/// Trimmed value of an optional text field, `None` when missing or blank
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
