//! Browser pages: listings and the add/update/delete forms

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::{error, info};

use crate::{
    AppState,
    error::{PageError, PageResult},
    models::{AddMovieForm, AddUserForm, Movie, NewMovie, UpdateMovieForm, User},
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/users", get(list_users))
        .route("/users/:id", get(user_movies))
        .route("/add_user", get(add_user_form).post(add_user))
        .route("/users/:id/add_movie", get(add_movie_form).post(add_movie))
        .route(
            "/users/:id/update_movie/:movie_id",
            get(update_movie_form).post(update_movie),
        )
        .route("/users/:id/delete_movie/:movie_id", post(delete_movie))
}

#[derive(Serialize)]
struct UserView {
    #[serde(flatten)]
    user: User,
    initials: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        let initials = user.initials();
        Self { user, initials }
    }
}

fn render(templates: &Tera, name: &str, ctx: &Context) -> PageResult<Html<String>> {
    Ok(Html(templates.render(name, ctx)?))
}

async fn find_user(state: &AppState, user_id: i64) -> PageResult<User> {
    state
        .data_manager
        .get_user(user_id)
        .await?
        .ok_or_else(|| PageError::NotFound("User not found".to_string()))
}

/// The movie, as long as it belongs to the user's collection
async fn find_user_movie(state: &AppState, user_id: i64, movie_id: i64) -> PageResult<Movie> {
    find_user(state, user_id).await?;
    state
        .data_manager
        .get_user_movie(user_id, movie_id)
        .await?
        .ok_or_else(|| PageError::NotFound("Movie not found".to_string()))
}

fn user_page(user_id: i64) -> Redirect {
    Redirect::to(&format!("/users/{}", user_id))
}

pub async fn home(State(state): State<AppState>) -> PageResult<Html<String>> {
    render(&state.templates, "home.html", &Context::new())
}

pub async fn list_users(State(state): State<AppState>) -> PageResult<Html<String>> {
    let users: Vec<UserView> = state
        .data_manager
        .get_all_users()
        .await?
        .into_iter()
        .map(UserView::from)
        .collect();

    let mut ctx = Context::new();
    ctx.insert("users", &users);
    render(&state.templates, "users.html", &ctx)
}

pub async fn user_movies(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> PageResult<Html<String>> {
    let user = find_user(&state, user_id).await?;
    let movies = state.data_manager.get_user_movies(user_id).await?;

    let mut ctx = Context::new();
    ctx.insert("user", &UserView::from(user));
    ctx.insert("movies", &movies);
    render(&state.templates, "user_movies.html", &ctx)
}

pub async fn add_user_form(State(state): State<AppState>) -> PageResult<Html<String>> {
    render(&state.templates, "add_user.html", &Context::new())
}

pub async fn add_user(
    State(state): State<AppState>,
    Form(form): Form<AddUserForm>,
) -> PageResult<Redirect> {
    let new_user = form
        .into_new_user()
        .ok_or_else(|| PageError::BadRequest("Username is required".to_string()))?;

    state.data_manager.add_user(&new_user).await?;
    Ok(Redirect::to("/users"))
}

pub async fn add_movie_form(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> PageResult<Html<String>> {
    let user = find_user(&state, user_id).await?;

    let mut ctx = Context::new();
    ctx.insert("user", &user);
    render(&state.templates, "add_movie.html", &ctx)
}

/// Look the title up in the movie database and store what it knows
pub async fn add_movie(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Form(form): Form<AddMovieForm>,
) -> PageResult<Redirect> {
    find_user(&state, user_id).await?;

    let title = form
        .title()
        .ok_or_else(|| PageError::BadRequest("Title is required".to_string()))?;

    info!(
        "Looking up '{}' with {} for user {}",
        title,
        state.metadata.name(),
        user_id
    );
    let metadata = state.metadata.lookup(&title).await?;

    state
        .data_manager
        .add_movie(user_id, &NewMovie::from_metadata(&metadata))
        .await?;
    Ok(user_page(user_id))
}

pub async fn update_movie_form(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
) -> PageResult<Html<String>> {
    let movie = find_user_movie(&state, user_id, movie_id).await?;

    let mut ctx = Context::new();
    ctx.insert("user_id", &user_id);
    ctx.insert("movie", &movie);
    render(&state.templates, "update_movie.html", &ctx)
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
    Form(form): Form<UpdateMovieForm>,
) -> PageResult<Redirect> {
    find_user_movie(&state, user_id, movie_id).await?;
    let changes = form.into_changes().map_err(PageError::BadRequest)?;

    state.data_manager.update_movie(movie_id, &changes).await?;
    Ok(user_page(user_id))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
) -> PageResult<Redirect> {
    find_user_movie(&state, user_id, movie_id).await?;

    state.data_manager.delete_movie(movie_id).await?;
    Ok(user_page(user_id))
}

/// Fallback for unmatched routes
pub async fn not_found(State(state): State<AppState>) -> Response {
    match state.templates.render("not_found.html", &Context::new()) {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(e) => {
            error!("Template error: {:?}", e);
            (StatusCode::NOT_FOUND, "Page not found").into_response()
        }
    }
}
