//! In-process store used when no `DATABASE_URL` is configured, and by
//! end-to-end tests.
//!
//! Mirrors the PostgreSQL schema: associations live in an ordered set keyed
//! by `(movie_id, category_id)`, so a pair can exist at most once, and
//! deleting a movie drops its associations.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use marquee_core::catalog::{Category, CategoryWithMovies, CreateMovie, Movie, MovieWithCategories};
use marquee_core::search::SearchFilter;
use marquee_core::types::DbId;
use tokio::sync::RwLock;

use crate::store::{CategoryStore, MovieStore, StoreError};

/// Category names seeded by the migrations, in id order.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Action/Adventure",
    "History",
    "Drama",
    "Comedy",
    "Science Fiction",
    "Family",
    "Documentary",
    "Thriller",
];

#[derive(Debug, Default)]
struct Catalog {
    movies: BTreeMap<DbId, Movie>,
    categories: BTreeMap<DbId, Category>,
    /// `(movie_id, category_id)`
    links: BTreeSet<(DbId, DbId)>,
    last_movie_id: DbId,
}

impl Catalog {
    fn category_ids_of(&self, movie_id: DbId) -> Vec<DbId> {
        self.links
            .range((movie_id, DbId::MIN)..=(movie_id, DbId::MAX))
            .map(|&(_, category_id)| category_id)
            .collect()
    }

    fn with_categories(&self, movie: &Movie) -> MovieWithCategories {
        let mut nested = MovieWithCategories::from_movie(movie.clone());
        nested.categories = self
            .category_ids_of(movie.id)
            .into_iter()
            .filter_map(|id| self.categories.get(&id).cloned())
            .collect();
        nested
    }

    fn with_movies(&self, category: &Category) -> CategoryWithMovies {
        let movies = self
            .links
            .iter()
            .filter(|&&(_, category_id)| category_id == category.id)
            .filter_map(|(movie_id, _)| self.movies.get(movie_id).cloned())
            .collect();
        CategoryWithMovies {
            id: category.id,
            name: category.name.clone(),
            movies,
        }
    }
}

/// Thread-safe in-memory catalog.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Catalog>,
}

impl InMemoryStore {
    /// An empty store with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with [`DEFAULT_CATEGORIES`] (ids starting at 1).
    pub fn with_default_categories() -> Self {
        Self::with_categories(DEFAULT_CATEGORIES.iter().copied())
    }

    /// A store seeded with the given category names (ids starting at 1).
    pub fn with_categories<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let categories = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| {
                (
                    id,
                    Category {
                        id,
                        name: name.to_string(),
                    },
                )
            })
            .collect();

        Self {
            inner: RwLock::new(Catalog {
                categories,
                ..Catalog::default()
            }),
        }
    }
}

#[async_trait]
impl MovieStore for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Movie>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog.movies.values().cloned().collect())
    }

    async fn get_all_with_categories(&self) -> Result<Vec<MovieWithCategories>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog
            .movies
            .values()
            .map(|m| catalog.with_categories(m))
            .collect())
    }

    async fn get_by_category(&self, category_id: DbId) -> Result<Vec<Movie>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog
            .movies
            .values()
            .filter(|m| catalog.links.contains(&(m.id, category_id)))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog.movies.get(&id).cloned())
    }

    async fn get_by_id_with_categories(
        &self,
        id: DbId,
    ) -> Result<Option<MovieWithCategories>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog.movies.get(&id).map(|m| catalog.with_categories(m)))
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Movie>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog
            .movies
            .values()
            .filter(|m| filter.matches(m, &catalog.category_ids_of(m.id)))
            .cloned()
            .collect())
    }

    async fn create(&self, input: &CreateMovie) -> Result<DbId, StoreError> {
        let mut catalog = self.inner.write().await;
        catalog.last_movie_id += 1;
        let id = catalog.last_movie_id;
        catalog.movies.insert(id, input.clone().into_movie(id));
        Ok(id)
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let mut catalog = self.inner.write().await;
        if catalog.movies.remove(&id).is_some() {
            catalog.links.retain(|&(movie_id, _)| movie_id != id);
        }
        Ok(())
    }

    async fn link_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), StoreError> {
        let mut catalog = self.inner.write().await;
        if catalog.movies.contains_key(&movie_id) && catalog.categories.contains_key(&category_id)
        {
            catalog.links.insert((movie_id, category_id));
        } else {
            tracing::debug!(movie_id, category_id, "Link was a no-op");
        }
        Ok(())
    }

    async fn unlink_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), StoreError> {
        let mut catalog = self.inner.write().await;
        catalog.links.remove(&(movie_id, category_id));
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Category>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog.categories.values().cloned().collect())
    }

    async fn get_all_with_movies(&self) -> Result<Vec<CategoryWithMovies>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog
            .categories
            .values()
            .map(|c| catalog.with_movies(c))
            .collect())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Category>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog.categories.get(&id).cloned())
    }

    async fn get_by_id_with_movies(
        &self,
        id: DbId,
    ) -> Result<Option<CategoryWithMovies>, StoreError> {
        let catalog = self.inner.read().await;
        Ok(catalog.categories.get(&id).map(|c| catalog.with_movies(c)))
    }
}
