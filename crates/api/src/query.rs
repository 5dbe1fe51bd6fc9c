//! Shared query parameter types for API handlers.
//!
//! Parameter names follow the public contract (`withCategories`,
//! `withMovies`), so fields are renamed from their snake_case Rust names.

use marquee_core::types::DbId;
use serde::{Deserialize, Deserializer};

/// Query parameters for `GET /movies`.
///
/// `withCategories` takes precedence over `category`.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    #[serde(rename = "withCategories", default, deserialize_with = "presence_flag")]
    pub with_categories: bool,
    pub category: Option<DbId>,
}

/// Query parameters for `GET /movies/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct WithCategoriesParams {
    #[serde(rename = "withCategories", default, deserialize_with = "presence_flag")]
    pub with_categories: bool,
}

/// Query parameters for `GET /categories` and `GET /categories/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct WithMoviesParams {
    #[serde(rename = "withMovies", default, deserialize_with = "presence_flag")]
    pub with_movies: bool,
}

/// A flag switched on by the key's presence.
///
/// `?withCategories`, `?withCategories=1` and `?withCategories=true` all turn
/// it on; only an explicit `false` or `0` turns it off. An absent key falls
/// back to `default` (off).
fn presence_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.is_some_and(|value| {
        !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0")
    }))
}
