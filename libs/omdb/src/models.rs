use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Placeholder OMDb uses (and we substitute) for a missing field
pub const NOT_AVAILABLE: &str = "N/A";

/// The subset of an OMDb record the service stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieMetadata {
    pub title: String,
    pub director: String,
    pub year: String,
    pub rating: String,
    pub poster: String,
}

impl MovieMetadata {
    /// Release year, taken from the leading digits ("2010–2015" is 2010).
    /// Unknown years are 0.
    pub fn year_number(&self) -> i32 {
        let digits: String = self
            .year
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(0)
    }

    /// IMDb rating as a number, 0.0 when unknown
    pub fn rating_value(&self) -> f64 {
        self.rating.trim().parse().unwrap_or(0.0)
    }

    pub fn poster_url(&self) -> Option<&str> {
        let poster = self.poster.trim();
        (!poster.is_empty() && poster != NOT_AVAILABLE).then_some(poster)
    }
}

/// Pull the stored fields out of a raw OMDb record.
///
/// Missing or non-string fields become [`NOT_AVAILABLE`].
pub fn extract_movie_data(raw: &Value) -> MovieMetadata {
    let field = |name: &str| {
        raw.get(name)
            .and_then(Value::as_str)
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };

    let metadata = MovieMetadata {
        title: field("Title"),
        director: field("Director"),
        year: field("Year"),
        rating: field("imdbRating"),
        poster: field("Poster"),
    };

    info!(
        "Extracted movie data: title={}, year={}, rating={}, poster={}",
        metadata.title, metadata.year, metadata.rating, metadata.poster
    );
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_renames_rating() {
        let raw = json!({
            "Title": "Inception",
            "Director": "C. Nolan",
            "Year": "2010",
            "imdbRating": "8.8",
            "Poster": "url"
        });

        let extracted = serde_json::to_value(extract_movie_data(&raw)).unwrap();
        assert_eq!(
            extracted,
            json!({
                "Title": "Inception",
                "Director": "C. Nolan",
                "Year": "2010",
                "Rating": "8.8",
                "Poster": "url"
            })
        );
    }

    #[test]
    fn test_extract_fills_missing_fields() {
        let metadata = extract_movie_data(&json!({ "Title": "Obscure", "Year": 1999 }));
        assert_eq!(metadata.title, "Obscure");
        assert_eq!(metadata.director, NOT_AVAILABLE);
        assert_eq!(metadata.year, NOT_AVAILABLE);
        assert_eq!(metadata.rating, NOT_AVAILABLE);
        assert_eq!(metadata.poster, NOT_AVAILABLE);
    }

    #[test]
    fn test_numeric_conversions() {
        let mut metadata = extract_movie_data(&json!({
            "Title": "Breaking Bad",
            "Year": "2008–2013",
            "imdbRating": "9.5",
            "Poster": "N/A"
        }));
        assert_eq!(metadata.year_number(), 2008);
        assert_eq!(metadata.rating_value(), 9.5);
        assert_eq!(metadata.poster_url(), None);

        metadata.year = NOT_AVAILABLE.to_string();
        metadata.rating = NOT_AVAILABLE.to_string();
        metadata.poster = "https://img/poster.jpg".to_string();
        assert_eq!(metadata.year_number(), 0);
        assert_eq!(metadata.rating_value(), 0.0);
        assert_eq!(metadata.poster_url(), Some("https://img/poster.jpg"));
    }
}
