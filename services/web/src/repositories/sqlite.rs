//! SQLite-backed data manager

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::DataManager;
use crate::{
    error::{DataError, DataResult},
    models::{Movie, MovieChanges, NewMovie, NewUser, User},
};

const MOVIE_COLUMNS: &str = "id, title, director, year, rating, poster, genre";

/// Data manager over a SQLite pool
#[derive(Clone)]
pub struct SqliteDataManager {
    pool: SqlitePool,
}

impl SqliteDataManager {
    /// Create a new data manager on an already migrated pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, user_id: i64) -> DataResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl DataManager for SqliteDataManager {
    async fn get_all_users(&self) -> DataResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, avatar FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn get_user(&self, user_id: i64) -> DataResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, avatar FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if user.is_none() {
            warn!("User with id {} not found", user_id);
        }
        Ok(user)
    }

    async fn get_user_movies(&self, user_id: i64) -> DataResult<Vec<Movie>> {
        if !self.user_exists(user_id).await? {
            warn!("User with id {} not found", user_id);
            return Err(DataError::user_not_found(user_id));
        }

        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.title, m.director, m.year, m.rating, m.poster, m.genre
            FROM movies m
            INNER JOIN user_movies um ON um.movie_id = m.id
            WHERE um.user_id = ?
            ORDER BY m.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn get_movie(&self, movie_id: i64) -> DataResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {} FROM movies WHERE id = ?",
            MOVIE_COLUMNS
        ))
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(movie)
    }

    async fn get_user_movie(&self, user_id: i64, movie_id: i64) -> DataResult<Option<Movie>> {
        if !self.user_exists(user_id).await? {
            warn!("User with id {} not found", user_id);
            return Err(DataError::user_not_found(user_id));
        }

        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.title, m.director, m.year, m.rating, m.poster, m.genre
            FROM movies m
            INNER JOIN user_movies um ON um.movie_id = m.id
            WHERE um.user_id = ? AND m.id = ?
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        if movie.is_none() {
            warn!("Movie {} is not in the collection of user {}", movie_id, user_id);
        }
        Ok(movie)
    }

    async fn add_user(&self, new_user: &NewUser) -> DataResult<User> {
        let name = new_user.name.trim();
        if name.is_empty() {
            return Err(DataError::Validation("Name is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, avatar)
            VALUES (?, ?)
            RETURNING id, name, avatar
            "#,
        )
        .bind(name)
        .bind(&new_user.avatar)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Added user {} ({})", user.id, user.name);
        Ok(user)
    }

    async fn add_movie(&self, user_id: i64, new_movie: &NewMovie) -> DataResult<Movie> {
        let title = new_movie.title.trim();
        if title.is_empty() {
            return Err(DataError::Validation("Title is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let owners: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        if owners == 0 {
            warn!("Cannot add movie '{}': user {} not found", title, user_id);
            return Err(DataError::user_not_found(user_id));
        }

        let movie = sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (title, director, year, rating, poster, genre)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        ))
        .bind(title)
        .bind(&new_movie.director)
        .bind(new_movie.year)
        .bind(new_movie.rating)
        .bind(&new_movie.poster)
        .bind(&new_movie.genre)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_movies (user_id, movie_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(movie.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Added movie {} ('{}') for user {}", movie.id, movie.title, user_id);
        Ok(movie)
    }

    async fn update_movie(&self, movie_id: i64, changes: &MovieChanges) -> DataResult<Movie> {
        let title = changes.title.trim();
        if title.is_empty() {
            return Err(DataError::Validation("Title is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let movie = sqlx::query_as::<_, Movie>(&format!(
            r#"
            UPDATE movies
            SET title = ?, director = ?, year = ?, rating = ?
            WHERE id = ?
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        ))
        .bind(title)
        .bind(&changes.director)
        .bind(changes.year)
        .bind(changes.rating)
        .bind(movie_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            warn!("Cannot update movie {}: not found", movie_id);
            DataError::movie_not_found(movie_id)
        })?;

        tx.commit().await?;

        info!("Updated movie {}", movie_id);
        Ok(movie)
    }

    async fn delete_movie(&self, movie_id: i64) -> DataResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_movies WHERE movie_id = ?")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            warn!("Cannot delete movie {}: not found", movie_id);
            return Err(DataError::movie_not_found(movie_id));
        }

        tx.commit().await?;

        info!("Deleted movie {}", movie_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::{DatabaseConfig, init_pool, run_migrations};

    async fn manager() -> (SqliteDataManager, SqlitePool) {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        (SqliteDataManager::new(pool.clone()), pool)
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            director: "Denis Villeneuve".to_string(),
            year: 2021,
            rating: 8.0,
            poster: None,
            genre: Some("Sci-Fi".to_string()),
        }
    }

    async fn movie_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_added_user_is_listed_once() {
        let (dm, _) = manager().await;

        dm.add_user(&NewUser::new("Alice")).await.unwrap();
        dm.add_user(&NewUser::new("Bob")).await.unwrap();

        let users = dm.get_all_users().await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(names.iter().filter(|n| **n == "Alice").count(), 1);
    }

    #[tokio::test]
    async fn test_add_user_rejects_blank_name() {
        let (dm, _) = manager().await;

        let err = dm.add_user(&NewUser::new("  ")).await.unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
        assert!(dm.get_all_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_user() {
        let (dm, _) = manager().await;
        let user = dm
            .add_user(&NewUser {
                name: "Carol".to_string(),
                avatar: Some("https://img/carol.png".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(dm.get_user(user.id).await.unwrap(), Some(user));
        assert_eq!(dm.get_user(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_movie_for_missing_user_creates_nothing() {
        let (dm, pool) = manager().await;

        let err = dm.add_movie(42, &new_movie("Dune")).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { entity: "User", id: 42 }));
        assert_eq!(movie_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_add_movie_links_to_user() {
        let (dm, _) = manager().await;
        let alice = dm.add_user(&NewUser::new("Alice")).await.unwrap();
        let bob = dm.add_user(&NewUser::new("Bob")).await.unwrap();

        let movie = dm.add_movie(alice.id, &new_movie("Dune")).await.unwrap();

        assert_eq!(dm.get_user_movies(alice.id).await.unwrap(), vec![movie.clone()]);
        assert!(dm.get_user_movies(bob.id).await.unwrap().is_empty());
        assert_eq!(dm.get_movie(movie.id).await.unwrap(), Some(movie));
    }

    #[tokio::test]
    async fn test_user_movies_for_missing_user() {
        let (dm, _) = manager().await;

        let err = dm.get_user_movies(7).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn test_get_user_movie_checks_owner() {
        let (dm, _) = manager().await;
        let alice = dm.add_user(&NewUser::new("Alice")).await.unwrap();
        let bob = dm.add_user(&NewUser::new("Bob")).await.unwrap();
        let movie = dm.add_movie(alice.id, &new_movie("Dune")).await.unwrap();

        assert_eq!(
            dm.get_user_movie(alice.id, movie.id).await.unwrap(),
            Some(movie.clone())
        );
        assert_eq!(dm.get_user_movie(bob.id, movie.id).await.unwrap(), None);

        let err = dm.get_user_movie(999, movie.id).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { entity: "User", id: 999 }));
    }

    #[tokio::test]
    async fn test_update_movie() {
        let (dm, _) = manager().await;
        let user = dm.add_user(&NewUser::new("Alice")).await.unwrap();
        let movie = dm.add_movie(user.id, &new_movie("Dune")).await.unwrap();

        let changes = MovieChanges {
            title: "Dune: Part One".to_string(),
            director: "D. Villeneuve".to_string(),
            year: 2021,
            rating: 8.1,
        };
        let updated = dm.update_movie(movie.id, &changes).await.unwrap();

        assert_eq!(updated.title, "Dune: Part One");
        assert_eq!(updated.director, "D. Villeneuve");
        assert_eq!(updated.rating, 8.1);
        assert_eq!(updated.genre, movie.genre);
        assert_eq!(dm.get_movie(movie.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_movie_mutates_nothing() {
        let (dm, _) = manager().await;
        let user = dm.add_user(&NewUser::new("Alice")).await.unwrap();
        let movie = dm.add_movie(user.id, &new_movie("Dune")).await.unwrap();

        let changes = MovieChanges {
            title: "Arrival".to_string(),
            director: "Denis Villeneuve".to_string(),
            year: 2016,
            rating: 7.9,
        };
        let err = dm.update_movie(movie.id + 100, &changes).await.unwrap_err();

        assert!(matches!(err, DataError::NotFound { entity: "Movie", .. }));
        assert_eq!(dm.get_movie(movie.id).await.unwrap(), Some(movie));
    }

    #[tokio::test]
    async fn test_delete_movie_twice() {
        let (dm, pool) = manager().await;
        let user = dm.add_user(&NewUser::new("Alice")).await.unwrap();
        let movie = dm.add_movie(user.id, &new_movie("Dune")).await.unwrap();

        dm.delete_movie(movie.id).await.unwrap();
        let err = dm.delete_movie(movie.id).await.unwrap_err();

        assert!(matches!(err, DataError::NotFound { entity: "Movie", .. }));
        assert_eq!(movie_count(&pool).await, 0);
        assert!(dm.get_user_movies(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_add_movie_rolls_back() {
        let (dm, pool) = manager().await;
        let user = dm.add_user(&NewUser::new("Alice")).await.unwrap();

        // The link insert fails after the movie row was written.
        sqlx::query("DROP TABLE user_movies")
            .execute(&pool)
            .await
            .unwrap();

        let err = dm.add_movie(user.id, &new_movie("Dune")).await.unwrap_err();
        assert!(matches!(err, DataError::Store(_)));
        assert_eq!(movie_count(&pool).await, 0);
    }
}
