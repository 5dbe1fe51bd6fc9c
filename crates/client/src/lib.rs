//! Client side of the movie catalog: an HTTP API client and the
//! [`MovieView`](view::MovieView) synchronizer that keeps one movie's
//! category list in step with the server.

pub mod api;
pub mod config;
pub mod error;
pub mod view;

pub use api::{HttpMovieApi, MovieApi};
pub use config::ClientConfig;
pub use error::{ClientError, SyncError};
pub use view::{MovieView, MutationOutcome, ViewState};
