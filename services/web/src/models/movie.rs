//! Movie models for the web service

use omdb::MovieMetadata;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::non_blank;

/// Default for fields the JSON API leaves out
pub const UNKNOWN: &str = "Unknown";

/// Movie entity
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
    pub poster: Option<String>,
    pub genre: Option<String>,
}

/// New movie creation payload
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
    pub poster: Option<String>,
    pub genre: Option<String>,
}

impl NewMovie {
    /// Movie built from what OMDb knows about a title
    pub fn from_metadata(metadata: &MovieMetadata) -> Self {
        Self {
            title: metadata.title.clone(),
            director: metadata.director.clone(),
            year: metadata.year_number(),
            rating: metadata.rating_value(),
            poster: metadata.poster_url().map(str::to_string),
            genre: None,
        }
    }
}

/// Editable movie fields
#[derive(Debug, Clone)]
pub struct MovieChanges {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
}

/// Entry of a user's JSON movie list
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
    pub genre: Option<String>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            director: movie.director,
            year: movie.year,
            rating: movie.rating,
            genre: movie.genre,
        }
    }
}

/// Body of `POST /api/users/{id}/movies`
#[derive(Debug, Default, Deserialize)]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre: Option<String>,
}

impl CreateMovieRequest {
    /// Fails when the title is missing or blank, or the rating is not a number
    pub fn into_new_movie(self) -> Result<NewMovie, String> {
        let title = non_blank(self.title).ok_or_else(|| "Title is required".to_string())?;
        let rating = match self.rating {
            Some(rating) => {
                finite_rating(rating).ok_or_else(|| format!("Invalid rating: {}", rating))?
            }
            None => 0.0,
        };

        Ok(NewMovie {
            title,
            director: non_blank(self.director).unwrap_or_else(|| UNKNOWN.to_string()),
            year: self.year.unwrap_or(0),
            rating,
            poster: None,
            genre: Some(non_blank(self.genre).unwrap_or_else(|| UNKNOWN.to_string())),
        })
    }
}

fn finite_rating(rating: f64) -> Option<f64> {
    rating.is_finite().then_some(rating)
}

#[derive(Debug, Serialize)]
pub struct CreateMovieResponse {
    pub message: String,
    pub movie_id: i64,
}

/// Fields of the add-movie form
#[derive(Debug, Default, Deserialize)]
pub struct AddMovieForm {
    pub title: Option<String>,
}

impl AddMovieForm {
    pub fn title(self) -> Option<String> {
        non_blank(self.title)
    }
}

/// Fields of the update-movie form, all required
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovieForm {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
}

impl UpdateMovieForm {
    pub fn into_changes(self) -> Result<MovieChanges, String> {
        let (Some(title), Some(director), Some(year), Some(rating)) = (
            non_blank(self.title),
            non_blank(self.director),
            non_blank(self.year),
            non_blank(self.rating),
        ) else {
            return Err("All fields are required".to_string());
        };

        let year = year
            .parse()
            .map_err(|_| format!("Invalid year: {}", year))?;
        let rating = rating
            .parse()
            .ok()
            .and_then(finite_rating)
            .ok_or_else(|| format!("Invalid rating: {}", rating))?;

        Ok(MovieChanges {
            title,
            director,
            year,
            rating,
        })
    }
}
