use crate::types::DbId;

/// Domain errors raised before or after a store call.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A single-resource read found no movie or category with that id.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A request payload failed domain validation (e.g. a blank title).
    #[error("Validation failed: {0}")]
    Validation(String),
}
