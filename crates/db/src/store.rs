//! The data-access contract the API depends on.
//!
//! Every operation is a single attempt: implementations never retry, and any
//! failure surfaces as a [`StoreError`]. Mutations on absent identifiers are
//! expected to be safe no-ops.

use async_trait::async_trait;
use marquee_core::catalog::{Category, CategoryWithMovies, CreateMovie, Movie, MovieWithCategories};
use marquee_core::search::SearchFilter;
use marquee_core::types::DbId;

/// The underlying engine was unreachable, rejected the operation, or timed out.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Movie reads and movie/category association mutations.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Movie>, StoreError>;

    /// Every movie with its categories (ascending category id).
    async fn get_all_with_categories(&self) -> Result<Vec<MovieWithCategories>, StoreError>;

    /// Movies linked to `category_id`.
    async fn get_by_category(&self, category_id: DbId) -> Result<Vec<Movie>, StoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError>;

    async fn get_by_id_with_categories(
        &self,
        id: DbId,
    ) -> Result<Option<MovieWithCategories>, StoreError>;

    /// Movies matching the title fragment AND any of the categories.
    /// Each movie appears at most once.
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Movie>, StoreError>;

    /// Insert a movie and return its server-assigned id.
    async fn create(&self, input: &CreateMovie) -> Result<DbId, StoreError>;

    /// Delete a movie unconditionally. Deleting an absent id is not an error.
    async fn delete(&self, id: DbId) -> Result<(), StoreError>;

    /// Attach a category. Idempotent; a pair exists at most once.
    async fn link_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), StoreError>;

    /// Detach a category. Detaching an absent pair is not an error.
    async fn unlink_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), StoreError>;

    /// Liveness probe for `/health`.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Read-only category access.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Category>, StoreError>;

    async fn get_all_with_movies(&self) -> Result<Vec<CategoryWithMovies>, StoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Category>, StoreError>;

    async fn get_by_id_with_movies(
        &self,
        id: DbId,
    ) -> Result<Option<CategoryWithMovies>, StoreError>;
}
