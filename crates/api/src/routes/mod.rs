pub mod categories;
pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                                    list (?withCategories, ?category), create
/// /movies/search                             search (?title, ?category...)
/// /movies/{id}                               get (?withCategories), delete
/// /movies/{movie_id}/categories              link a category (POST)
/// /movies/{movie_id}/categories/{category_id} unlink a category (DELETE)
///
/// /categories                                list (?withMovies)
/// /categories/{id}                           get (?withMovies)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movies", movies::router())
        .nest("/categories", categories::router())
}
