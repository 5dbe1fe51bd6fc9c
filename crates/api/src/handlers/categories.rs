//! Handlers for the read-only category endpoints.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::query::WithMoviesParams;
use crate::state::AppState;

/// GET /api/v1/categories[?withMovies=true]
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<WithMoviesParams>,
) -> AppResult<Response> {
    if params.with_movies {
        let categories = state.categories.get_all_with_movies().await?;
        return Ok(Json(categories).into_response());
    }

    let categories = state.categories.get_all().await?;

    Ok(Json(categories).into_response())
}

/// GET /api/v1/categories/{id}[?withMovies=true]
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiQuery(params): ApiQuery<WithMoviesParams>,
) -> AppResult<Response> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        })
    };

    if params.with_movies {
        let category = state
            .categories
            .get_by_id_with_movies(id)
            .await?
            .ok_or_else(not_found)?;
        return Ok(Json(category).into_response());
    }

    let category = state
        .categories
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(category).into_response())
}
