//! Repository for the `movies` and `movie_categories` tables.

use sqlx::{FromRow, PgPool};
use marquee_core::catalog::{Category, CreateMovie, Movie, MovieWithCategories};
use marquee_core::search::{escape_like, SearchFilter};
use marquee_core::types::DbId;

/// Column list shared across single-table queries.
const COLUMNS: &str = "id, title, release_year";

/// Movie columns plus the (nullable) category of a `LEFT JOIN`.
const JOINED_COLUMNS: &str = "\
    m.id, m.title, m.release_year, \
    c.id AS category_id, c.name AS category_name";

/// One row of a movie `LEFT JOIN` categories query.
#[derive(Debug, FromRow)]
struct MovieCategoryRow {
    id: DbId,
    title: String,
    release_year: i32,
    category_id: Option<DbId>,
    category_name: Option<String>,
}

/// Provides reads for movies and mutations on their category links.
pub struct MovieRepo;

impl MovieRepo {
    /// List all movies, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// List all movies with their categories nested.
    pub async fn list_with_categories(
        pool: &PgPool,
    ) -> Result<Vec<MovieWithCategories>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM movies m \
             LEFT JOIN movie_categories mc ON mc.movie_id = m.id \
             LEFT JOIN categories c ON c.id = mc.category_id \
             ORDER BY m.id, c.id"
        );
        let rows = sqlx::query_as::<_, MovieCategoryRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(group_rows(rows))
    }

    /// List movies linked to a category, ordered by id.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(
            "SELECT m.id, m.title, m.release_year FROM movies m \
             JOIN movie_categories mc ON mc.movie_id = m.id \
             WHERE mc.category_id = $1 \
             ORDER BY m.id",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by its ID with its categories nested.
    pub async fn find_by_id_with_categories(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MovieWithCategories>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM movies m \
             LEFT JOIN movie_categories mc ON mc.movie_id = m.id \
             LEFT JOIN categories c ON c.id = mc.category_id \
             WHERE m.id = $1 \
             ORDER BY c.id"
        );
        let rows = sqlx::query_as::<_, MovieCategoryRow>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(group_rows(rows).into_iter().next())
    }

    /// Search by case-insensitive title fragment AND any-of categories.
    ///
    /// `EXISTS` keeps each movie to a single row however many of the
    /// requested categories it belongs to.
    pub async fn search(pool: &PgPool, filter: &SearchFilter) -> Result<Vec<Movie>, sqlx::Error> {
        let pattern = filter.title().map(escape_like);

        sqlx::query_as::<_, Movie>(
            "SELECT m.id, m.title, m.release_year FROM movies m \
             WHERE ($1::text IS NULL OR m.title ILIKE '%' || $1 || '%') \
               AND (cardinality($2::bigint[]) = 0 OR EXISTS ( \
                     SELECT 1 FROM movie_categories mc \
                     WHERE mc.movie_id = m.id AND mc.category_id = ANY($2))) \
             ORDER BY m.id",
        )
        .bind(pattern)
        .bind(filter.category_ids())
        .fetch_all(pool)
        .await
    }

    /// Insert a movie, returning its new id.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO movies (title, release_year) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.title)
        .bind(input.release_year)
        .fetch_one(pool)
        .await
    }

    /// Delete a movie by ID. Cascade deletes its category links.
    ///
    /// Returns `true` if a movie was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link a category to a movie. Idempotent: does nothing if already linked,
    /// and does nothing if either side does not exist.
    ///
    /// Returns `true` if a new association was created.
    pub async fn add_category(
        pool: &PgPool,
        movie_id: DbId,
        category_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO movie_categories (movie_id, category_id) \
             SELECT m.id, c.id FROM movies m, categories c \
             WHERE m.id = $1 AND c.id = $2 \
             ON CONFLICT (movie_id, category_id) DO NOTHING",
        )
        .bind(movie_id)
        .bind(category_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unlink a category from a movie.
    ///
    /// Returns `true` if an association was removed.
    pub async fn remove_category(
        pool: &PgPool,
        movie_id: DbId,
        category_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM movie_categories WHERE movie_id = $1 AND category_id = $2")
                .bind(movie_id)
                .bind(category_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Fold `LEFT JOIN` rows (ordered by movie id) into nested movies.
fn group_rows(rows: Vec<MovieCategoryRow>) -> Vec<MovieWithCategories> {
    let mut movies: Vec<MovieWithCategories> = Vec::new();

    for row in rows {
        let is_new = movies.last().map_or(true, |m| m.id != row.id);
        if is_new {
            movies.push(MovieWithCategories::from_movie(Movie {
                id: row.id,
                title: row.title,
                release_year: row.release_year,
            }));
        }

        if let (Some(id), Some(name), Some(movie)) =
            (row.category_id, row.category_name, movies.last_mut())
        {
            movie.categories.push(Category { id, name });
        }
    }

    movies
}
