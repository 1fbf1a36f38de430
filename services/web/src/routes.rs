//! Router assembly and the JSON API

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::warn;

use crate::{
    AppState,
    error::{ApiError, ApiResult, DataError},
    models::{CreateMovieRequest, CreateMovieResponse, MovieResponse, UserResponse},
    pages,
};

/// Create the router for the web service
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users", get(get_users))
        .route(
            "/users/:id/movies",
            get(get_user_movies).post(add_movie_to_user),
        )
        .route("/movies/:id", get(get_movie));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .merge(pages::page_routes())
        .fallback(pages::not_found)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database_ok { "ok" } else { "unavailable" },
            "service": "movieweb"
        })),
    )
}

/// List all users
pub async fn get_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users: Vec<UserResponse> = state
        .data_manager
        .get_all_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

/// List the movies of one user
pub async fn get_user_movies(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(user_id) = path?;
    let movies: Vec<MovieResponse> = state
        .data_manager
        .get_user_movies(user_id)
        .await?
        .into_iter()
        .map(MovieResponse::from)
        .collect();

    Ok(Json(movies))
}

/// Add a movie to a user's collection
pub async fn add_movie_to_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(user_id) = path?;
    if state.data_manager.get_user(user_id).await?.is_none() {
        return Err(DataError::user_not_found(user_id).into());
    }

    let request = match payload {
        Ok(Json(request)) => request,
        // Well-formed JSON whose fields have the wrong types
        Err(JsonRejection::JsonDataError(rejection)) => {
            warn!("Rejected movie payload: {}", rejection);
            return Err(ApiError::BadRequest(format!(
                "Invalid movie payload: {}",
                rejection.body_text()
            )));
        }
        Err(rejection) => {
            warn!("Rejected movie payload: {}", rejection);
            CreateMovieRequest::default()
        }
    };
    let new_movie = request.into_new_movie().map_err(ApiError::BadRequest)?;

    let movie = state.data_manager.add_movie(user_id, &new_movie).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateMovieResponse {
            message: "Movie added successfully".to_string(),
            movie_id: movie.id,
        }),
    ))
}

/// Get a movie by ID
pub async fn get_movie(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(movie_id) = path?;
    let movie = state
        .data_manager
        .get_movie(movie_id)
        .await?
        .ok_or(ApiError::NotFound("Movie not found".to_string()))?;

    Ok(Json(movie))
}
