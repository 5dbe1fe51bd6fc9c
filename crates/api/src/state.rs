use std::sync::Arc;

use marquee_db::{CategoryStore, MovieStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Handlers hold no
/// state of their own across requests; all consistency lives in the stores.
#[derive(Clone)]
pub struct AppState {
    /// Movie reads and association mutations.
    pub movies: Arc<dyn MovieStore>,
    /// Category reads.
    pub categories: Arc<dyn CategoryStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by a single store serving both movie and category reads.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: MovieStore + CategoryStore + 'static,
    {
        Self {
            movies: store.clone(),
            categories: store,
            config: Arc::new(config),
        }
    }
}
