//! Repository for the `categories` table.

use sqlx::{FromRow, PgPool};
use marquee_core::catalog::{Category, CategoryWithMovies, Movie};
use marquee_core::types::DbId;

/// Column list shared across single-table queries.
const COLUMNS: &str = "id, name";

/// Category columns plus the (nullable) movie of a `LEFT JOIN`.
const JOINED_COLUMNS: &str = "\
    c.id, c.name, \
    m.id AS movie_id, m.title AS movie_title, m.release_year AS movie_release_year";

#[derive(Debug, FromRow)]
struct CategoryMovieRow {
    id: DbId,
    name: String,
    movie_id: Option<DbId>,
    movie_title: Option<String>,
    movie_release_year: Option<i32>,
}

/// Read-only access to categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// List all categories with their movies nested.
    pub async fn list_with_movies(pool: &PgPool) -> Result<Vec<CategoryWithMovies>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM categories c \
             LEFT JOIN movie_categories mc ON mc.category_id = c.id \
             LEFT JOIN movies m ON m.id = mc.movie_id \
             ORDER BY c.id, m.id"
        );
        let rows = sqlx::query_as::<_, CategoryMovieRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(group_rows(rows))
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its ID with its movies nested.
    pub async fn find_by_id_with_movies(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategoryWithMovies>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM categories c \
             LEFT JOIN movie_categories mc ON mc.category_id = c.id \
             LEFT JOIN movies m ON m.id = mc.movie_id \
             WHERE c.id = $1 \
             ORDER BY m.id"
        );
        let rows = sqlx::query_as::<_, CategoryMovieRow>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(group_rows(rows).into_iter().next())
    }
}

fn group_rows(rows: Vec<CategoryMovieRow>) -> Vec<CategoryWithMovies> {
    let mut categories: Vec<CategoryWithMovies> = Vec::new();

    for row in rows {
        if categories.last().map_or(true, |c| c.id != row.id) {
            categories.push(CategoryWithMovies {
                id: row.id,
                name: row.name,
                movies: Vec::new(),
            });
        }

        if let (Some(id), Some(title), Some(release_year), Some(category)) = (
            row.movie_id,
            row.movie_title,
            row.movie_release_year,
            categories.last_mut(),
        ) {
            category.movies.push(Movie {
                id,
                title,
                release_year,
            });
        }
    }

    categories
}
