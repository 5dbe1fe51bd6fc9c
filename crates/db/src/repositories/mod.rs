//! PostgreSQL repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. [`PgStore`] adapts them to the
//! store traits.

pub mod category_repo;
pub mod movie_repo;

pub use category_repo::CategoryRepo;
pub use movie_repo::MovieRepo;

use async_trait::async_trait;
use marquee_core::catalog::{Category, CategoryWithMovies, CreateMovie, Movie, MovieWithCategories};
use marquee_core::search::SearchFilter;
use marquee_core::types::DbId;

use crate::store::{CategoryStore, MovieStore, StoreError};
use crate::DbPool;

/// Store backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn get_all(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(MovieRepo::list(&self.pool).await?)
    }

    async fn get_all_with_categories(&self) -> Result<Vec<MovieWithCategories>, StoreError> {
        Ok(MovieRepo::list_with_categories(&self.pool).await?)
    }

    async fn get_by_category(&self, category_id: DbId) -> Result<Vec<Movie>, StoreError> {
        Ok(MovieRepo::list_by_category(&self.pool, category_id).await?)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_by_id_with_categories(
        &self,
        id: DbId,
    ) -> Result<Option<MovieWithCategories>, StoreError> {
        Ok(MovieRepo::find_by_id_with_categories(&self.pool, id).await?)
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Movie>, StoreError> {
        Ok(MovieRepo::search(&self.pool, filter).await?)
    }

    async fn create(&self, input: &CreateMovie) -> Result<DbId, StoreError> {
        Ok(MovieRepo::create(&self.pool, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        if !MovieRepo::delete(&self.pool, id).await? {
            tracing::debug!(movie_id = id, "Delete matched no movie");
        }
        Ok(())
    }

    async fn link_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), StoreError> {
        if !MovieRepo::add_category(&self.pool, movie_id, category_id).await? {
            tracing::debug!(movie_id, category_id, "Link was a no-op");
        }
        Ok(())
    }

    async fn unlink_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), StoreError> {
        if !MovieRepo::remove_category(&self.pool, movie_id, category_id).await? {
            tracing::debug!(movie_id, category_id, "Unlink matched no association");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn get_all(&self) -> Result<Vec<Category>, StoreError> {
        Ok(CategoryRepo::list(&self.pool).await?)
    }

    async fn get_all_with_movies(&self) -> Result<Vec<CategoryWithMovies>, StoreError> {
        Ok(CategoryRepo::list_with_movies(&self.pool).await?)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Category>, StoreError> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_by_id_with_movies(
        &self,
        id: DbId,
    ) -> Result<Option<CategoryWithMovies>, StoreError> {
        Ok(CategoryRepo::find_by_id_with_movies(&self.pool, id).await?)
    }
}
