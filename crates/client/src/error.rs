use marquee_core::types::DbId;

/// Errors from the HTTP API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered 404 for a single-resource read.
    #[error("Resource not found")]
    NotFound,

    /// The server returned any other non-2xx status. Error bodies are empty,
    /// so the status is all there is.
    #[error("API error ({status})")]
    Status { status: u16 },
}

/// A category mutation was not confirmed by the server.
///
/// The local view is left exactly as it was before the attempt.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Failed to add category {category_id} to movie {movie_id}: {source}")]
    Link {
        movie_id: DbId,
        category_id: DbId,
        source: ClientError,
    },

    #[error("Failed to remove category {category_id} from movie {movie_id}: {source}")]
    Unlink {
        movie_id: DbId,
        category_id: DbId,
        source: ClientError,
    },
}
