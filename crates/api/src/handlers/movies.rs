//! Handlers for movies and their category associations.
//!
//! Each handler is stateless: validate the request shape, make one store
//! call, map the outcome to a status. Single-resource reads distinguish an
//! absent target (404) from a store failure (500); list reads and mutations
//! do not, because the store no-ops safely on absent identifiers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::catalog::{CreateMovie, LinkCategory};
use marquee_core::error::CoreError;
use marquee_core::search::SearchFilter;
use marquee_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::{MovieListParams, WithCategoriesParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/movies[?withCategories=true | ?category={id}]
pub async fn list_movies(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MovieListParams>,
) -> AppResult<Response> {
    if params.with_categories {
        let movies = state.movies.get_all_with_categories().await?;
        return Ok(Json(movies).into_response());
    }

    let movies = match params.category {
        Some(category_id) => state.movies.get_by_category(category_id).await?,
        None => state.movies.get_all().await?,
    };

    Ok(Json(movies).into_response())
}

/// GET /api/v1/movies/search?title={text}&category={id}[&category={id}...]
///
/// `title` may appear at most once; a repeated title is rejected before the
/// store is consulted.
pub async fn search_movies(
    State(state): State<AppState>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let filter = SearchFilter::from_query_pairs(&pairs)?;

    let movies = state.movies.search(&filter).await?;

    Ok(Json(movies))
}

/// GET /api/v1/movies/{id}[?withCategories=true]
pub async fn get_movie(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiQuery(params): ApiQuery<WithCategoriesParams>,
) -> AppResult<Response> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Movie", id });

    if params.with_categories {
        let movie = state
            .movies
            .get_by_id_with_categories(id)
            .await?
            .ok_or_else(not_found)?;
        return Ok(Json(movie).into_response());
    }

    let movie = state.movies.get_by_id(id).await?.ok_or_else(not_found)?;

    Ok(Json(movie).into_response())
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/movies
///
/// Responds with the stored record: the new id plus the echoed fields.
pub async fn create_movie(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let id = state.movies.create(&input).await?;

    tracing::info!(movie_id = id, title = %input.title, "Movie created");

    Ok(Json(input.into_movie(id)))
}

/// DELETE /api/v1/movies/{id}
///
/// Reports success whether or not the movie existed.
pub async fn delete_movie(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.movies.delete(id).await?;

    tracing::info!(movie_id = id, "Movie deleted");

    Ok(StatusCode::OK)
}

/// POST /api/v1/movies/{movie_id}/categories
///
/// Body `{ "id": <category id> }`. Responds 201 with no body.
pub async fn add_category(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<LinkCategory>,
) -> AppResult<impl IntoResponse> {
    state.movies.link_category(movie_id, input.id).await?;

    tracing::info!(movie_id, category_id = input.id, "Category linked to movie");

    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/movies/{movie_id}/categories/{category_id}
///
/// Responds 204 with no body.
pub async fn remove_category(
    State(state): State<AppState>,
    ApiPath((movie_id, category_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    state.movies.unlink_category(movie_id, category_id).await?;

    tracing::info!(movie_id, category_id, "Category unlinked from movie");

    Ok(StatusCode::NO_CONTENT)
}
