//! Route definitions for movies and their category associations.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Movie routes mounted at `/movies`.
///
/// ```text
/// GET    /                                  -> list_movies
/// POST   /                                  -> create_movie
/// GET    /search                            -> search_movies
/// GET    /{id}                              -> get_movie
/// DELETE /{id}                              -> delete_movie
/// POST   /{movie_id}/categories             -> add_category
/// DELETE /{movie_id}/categories/{category_id} -> remove_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/search", get(movies::search_movies))
        .route("/{id}", get(movies::get_movie).delete(movies::delete_movie))
        .route("/{movie_id}/categories", post(movies::add_category))
        .route(
            "/{movie_id}/categories/{category_id}",
            delete(movies::remove_category),
        )
}
