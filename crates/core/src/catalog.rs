//! Movie and category records, plus the request payloads that create and
//! link them.
//!
//! The row structs derive `sqlx::FromRow` only when the `sqlx` feature is
//! enabled, which keeps the client free of any database dependency.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A row from the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub release_year: i32,
}

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// A movie together with every category it is linked to, ordered by
/// ascending category id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieWithCategories {
    pub id: DbId,
    pub title: String,
    pub release_year: i32,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl MovieWithCategories {
    /// Wrap a bare movie with an empty category list.
    pub fn from_movie(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            release_year: movie.release_year,
            categories: Vec::new(),
        }
    }
}

/// A category together with every movie linked to it, ordered by ascending
/// movie id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithMovies {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Body of `POST /movies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub release_year: i32,
}

impl CreateMovie {
    /// Reject payloads the store must never see.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        Ok(())
    }

    /// The record the API echoes back once the store has assigned `id`.
    pub fn into_movie(self, id: DbId) -> Movie {
        Movie {
            id,
            title: self.title,
            release_year: self.release_year,
        }
    }
}

/// Body of `POST /movies/{movie_id}/categories`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCategory {
    /// Id of the category to attach.
    pub id: DbId,
}
