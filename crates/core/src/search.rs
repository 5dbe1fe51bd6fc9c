//! Search filter normalization.
//!
//! Turns the raw `title` and `category` query values into a validated
//! [`SearchFilter`]. The rules are asymmetric on purpose: `category` may be
//! given any number of times, while `title` may be given at most once.
//!
//! This module lives in `core` (no I/O) so the API, the stores and the client
//! all share one definition of what a filter means.

use crate::catalog::Movie;
use crate::types::DbId;

/// Query key carrying the title fragment.
pub const TITLE_PARAM: &str = "title";

/// Query key carrying a category id. May repeat.
pub const CATEGORY_PARAM: &str = "category";

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// How many times a query key was supplied, with its values in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParam<'a> {
    Absent,
    Single(&'a str),
    Multiple(Vec<&'a str>),
}

impl<'a> RawParam<'a> {
    /// Classify every value supplied for `key` in a decoded query string.
    pub fn collect(pairs: &'a [(String, String)], key: &str) -> Self {
        let mut values: Vec<&'a str> = pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect();

        match values.len() {
            0 => RawParam::Absent,
            1 => RawParam::Single(values.remove(0)),
            _ => RawParam::Multiple(values),
        }
    }

    fn into_values(self) -> Vec<&'a str> {
        match self {
            RawParam::Absent => Vec::new(),
            RawParam::Single(v) => vec![v],
            RawParam::Multiple(vs) => vs,
        }
    }
}

/// The filter could not be built from the supplied query. Deliberately
/// carries no detail; callers answer with a bare 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid search filter")]
pub struct InvalidFilter;

// ---------------------------------------------------------------------------
// Validated filter
// ---------------------------------------------------------------------------

/// A validated movie search: optional title fragment AND any-of categories.
///
/// An empty category list means "no category constraint". Duplicate ids are
/// kept as given; the store decides whether to collapse them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    title: Option<String>,
    category_ids: Vec<DbId>,
}

impl SearchFilter {
    /// Build a filter directly. A blank title is treated as no title.
    pub fn new(title: Option<String>, category_ids: Vec<DbId>) -> Self {
        let title = title.filter(|t| !t.trim().is_empty());
        Self {
            title,
            category_ids,
        }
    }

    /// Normalize raw `title` / `category` values.
    ///
    /// - `title` given more than once is invalid.
    /// - Each `category` value must parse as an integer id.
    pub fn from_raw(title: RawParam<'_>, category: RawParam<'_>) -> Result<Self, InvalidFilter> {
        let title = match title {
            RawParam::Absent => None,
            RawParam::Single(t) => Some(t.to_string()),
            RawParam::Multiple(_) => return Err(InvalidFilter),
        };

        let category_ids = category
            .into_values()
            .into_iter()
            .map(|v| v.trim().parse::<DbId>().map_err(|_| InvalidFilter))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(title, category_ids))
    }

    /// Normalize a decoded query string (`title=..&category=..&category=..`).
    /// Keys other than `title` and `category` are ignored.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Result<Self, InvalidFilter> {
        Self::from_raw(
            RawParam::collect(pairs, TITLE_PARAM),
            RawParam::collect(pairs, CATEGORY_PARAM),
        )
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn category_ids(&self) -> &[DbId] {
        &self.category_ids
    }

    /// Render the filter back into query pairs, title first.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(self.category_ids.len() + 1);
        if let Some(title) = &self.title {
            pairs.push((TITLE_PARAM, title.clone()));
        }
        pairs.extend(
            self.category_ids
                .iter()
                .map(|id| (CATEGORY_PARAM, id.to_string())),
        );
        pairs
    }

    /// Evaluate the predicate against one movie and the ids of its categories.
    ///
    /// Title matching is a case-insensitive substring test.
    pub fn matches(&self, movie: &Movie, movie_category_ids: &[DbId]) -> bool {
        let title_ok = match &self.title {
            Some(fragment) => movie
                .title
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            None => true,
        };

        let category_ok = self.category_ids.is_empty()
            || self
                .category_ids
                .iter()
                .any(|id| movie_category_ids.contains(id));

        title_ok && category_ok
    }
}

/// Escape `%`, `_` and `\` so a user fragment is matched literally inside a
/// `LIKE '%' || $1 || '%'` pattern (default `\` escape character).
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
