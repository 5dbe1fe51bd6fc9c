//! Client-held view of one movie and its categories.
//!
//! A [`MovieView`] caches what the server last returned for the selected
//! movie. Category mutations are pessimistic: the server call goes out first
//! and the local list changes only once the server confirms. A failed
//! mutation leaves the list untouched and is reported to the caller without
//! touching the [`ViewState`].
//!
//! Mutations take `&mut self`, so at most one is in flight per view.

use marquee_core::catalog::{Category, MovieWithCategories};
use marquee_core::types::DbId;
use tokio::sync::watch;

use crate::api::MovieApi;
use crate::error::SyncError;

/// Lifecycle of the selected movie's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// No movie selected yet.
    Empty,
    /// A fetch for `movie_id` is in flight.
    Loading { movie_id: DbId },
    /// The movie and its categories, in server order or re-sorted by id
    /// after a confirmed mutation.
    Loaded(MovieWithCategories),
    /// The fetch for `movie_id` failed (including a 404).
    Failed { movie_id: DbId, reason: String },
}

impl ViewState {
    pub fn movie(&self) -> Option<&MovieWithCategories> {
        match self {
            ViewState::Loaded(movie) => Some(movie),
            _ => None,
        }
    }
}

/// Result of a category mutation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server confirmed the change and the local view reflects it.
    Applied,
    /// No movie is loaded, so nothing was sent.
    Skipped,
}

/// Synchronized view of a single movie.
///
/// Created when a movie is selected and dropped when the consumer navigates
/// away. Observers get the current [`ViewState`] through [`subscribe`].
///
/// [`subscribe`]: MovieView::subscribe
pub struct MovieView<A> {
    api: A,
    state: watch::Sender<ViewState>,
}

impl<A: MovieApi> MovieView<A> {
    /// A view with nothing selected.
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(ViewState::Empty);
        Self { api, state }
    }

    /// Create a view and load `movie_id` into it.
    pub async fn open(api: A, movie_id: DbId) -> Self {
        let mut view = Self::new(api);
        view.select(movie_id).await;
        view
    }

    /// Switch to `movie_id`, discarding whatever was held before.
    ///
    /// Publishes `Loading` immediately, then `Loaded` or `Failed` once the
    /// fetch resolves.
    pub async fn select(&mut self, movie_id: DbId) {
        self.state.send_replace(ViewState::Loading { movie_id });

        let next = match self.api.get_movie_with_categories(movie_id).await {
            Ok(movie) => {
                tracing::debug!(
                    movie_id,
                    categories = movie.categories.len(),
                    "Movie view loaded"
                );
                ViewState::Loaded(movie)
            }
            Err(err) => {
                tracing::warn!(movie_id, error = %err, "Movie view failed to load");
                ViewState::Failed {
                    movie_id,
                    reason: err.to_string(),
                }
            }
        };

        self.state.send_replace(next);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change of this view.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Attach `category` to the loaded movie.
    ///
    /// On confirmation the category is appended (unless already present) and
    /// the list re-sorted ascending by id.
    pub async fn add_category(
        &mut self,
        category: Category,
    ) -> Result<MutationOutcome, SyncError> {
        let Some(movie_id) = self.loaded_movie_id() else {
            tracing::debug!(category_id = category.id, "No movie loaded, skipping add");
            return Ok(MutationOutcome::Skipped);
        };

        self.api
            .add_category(movie_id, category.id)
            .await
            .map_err(|source| SyncError::Link {
                movie_id,
                category_id: category.id,
                source,
            })?;

        self.state.send_modify(|state| {
            if let ViewState::Loaded(movie) = state {
                if !movie.categories.iter().any(|c| c.id == category.id) {
                    movie.categories.push(category);
                    movie.categories.sort_by_key(|c| c.id);
                }
            }
        });

        Ok(MutationOutcome::Applied)
    }

    /// Detach the category with `category_id` from the loaded movie.
    pub async fn remove_category(
        &mut self,
        category_id: DbId,
    ) -> Result<MutationOutcome, SyncError> {
        let Some(movie_id) = self.loaded_movie_id() else {
            tracing::debug!(category_id, "No movie loaded, skipping remove");
            return Ok(MutationOutcome::Skipped);
        };

        self.api
            .remove_category(movie_id, category_id)
            .await
            .map_err(|source| SyncError::Unlink {
                movie_id,
                category_id,
                source,
            })?;

        self.state.send_modify(|state| {
            if let ViewState::Loaded(movie) = state {
                movie.categories.retain(|c| c.id != category_id);
            }
        });

        Ok(MutationOutcome::Applied)
    }

    /// Categories from `all` not yet attached to the loaded movie, in the
    /// order given. Empty when nothing is loaded.
    pub fn available_categories(&self, all: &[Category]) -> Vec<Category> {
        let state = self.state.borrow();
        let Some(movie) = state.movie() else {
            return Vec::new();
        };
        all.iter()
            .filter(|candidate| !movie.categories.iter().any(|c| c.id == candidate.id))
            .cloned()
            .collect()
    }

    fn loaded_movie_id(&self) -> Option<DbId> {
        self.state.borrow().movie().map(|movie| movie.id)
    }
}
