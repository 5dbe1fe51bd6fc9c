//! REST API client for the movie catalog endpoints.
//!
//! [`MovieApi`] is the seam the [`MovieView`](crate::view::MovieView) talks
//! through; [`HttpMovieApi`] implements it over [`reqwest`].

use async_trait::async_trait;
use marquee_core::catalog::{
    Category, CategoryWithMovies, CreateMovie, LinkCategory, Movie, MovieWithCategories,
};
use marquee_core::search::SearchFilter;
use marquee_core::types::DbId;
use reqwest::StatusCode;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Every operation the server exposes under `/api/v1`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, ClientError>;

    async fn list_movies_with_categories(&self) -> Result<Vec<MovieWithCategories>, ClientError>;

    async fn list_movies_by_category(&self, category_id: DbId) -> Result<Vec<Movie>, ClientError>;

    async fn search_movies(&self, filter: &SearchFilter) -> Result<Vec<Movie>, ClientError>;

    async fn get_movie(&self, id: DbId) -> Result<Movie, ClientError>;

    async fn get_movie_with_categories(&self, id: DbId)
        -> Result<MovieWithCategories, ClientError>;

    /// Returns the stored record, including its new id.
    async fn create_movie(&self, input: &CreateMovie) -> Result<Movie, ClientError>;

    async fn delete_movie(&self, id: DbId) -> Result<(), ClientError>;

    async fn add_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), ClientError>;

    async fn remove_category(&self, movie_id: DbId, category_id: DbId)
        -> Result<(), ClientError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;

    async fn list_categories_with_movies(&self) -> Result<Vec<CategoryWithMovies>, ClientError>;

    async fn get_category(&self, id: DbId) -> Result<Category, ClientError>;

    async fn get_category_with_movies(&self, id: DbId)
        -> Result<CategoryWithMovies, ClientError>;
}

/// HTTP client for a single API deployment.
#[derive(Debug, Clone)]
pub struct HttpMovieApi {
    client: reqwest::Client,
    api_url: String,
}

impl HttpMovieApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Versioned base URL, e.g. `http://host:3000/api/v1`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Map non-2xx statuses onto [`ClientError`], passing successes through.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %response.url(), "API request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

fn with_categories() -> [(&'static str, String); 1] {
    [("withCategories", "true".to_string())]
}

fn with_movies() -> [(&'static str, String); 1] {
    [("withMovies", "true".to_string())]
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        self.get_json("/movies", &[]).await
    }

    async fn list_movies_with_categories(&self) -> Result<Vec<MovieWithCategories>, ClientError> {
        self.get_json("/movies", &with_categories()).await
    }

    async fn list_movies_by_category(&self, category_id: DbId) -> Result<Vec<Movie>, ClientError> {
        self.get_json("/movies", &[("category", category_id.to_string())])
            .await
    }

    async fn search_movies(&self, filter: &SearchFilter) -> Result<Vec<Movie>, ClientError> {
        self.get_json("/movies/search", &filter.to_query_pairs())
            .await
    }

    async fn get_movie(&self, id: DbId) -> Result<Movie, ClientError> {
        self.get_json(&format!("/movies/{id}"), &[]).await
    }

    async fn get_movie_with_categories(
        &self,
        id: DbId,
    ) -> Result<MovieWithCategories, ClientError> {
        self.get_json(&format!("/movies/{id}"), &with_categories())
            .await
    }

    async fn create_movie(&self, input: &CreateMovie) -> Result<Movie, ClientError> {
        let response = self
            .client
            .post(self.url("/movies"))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete_movie(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/movies/{id}")))
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn add_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/movies/{movie_id}/categories")))
            .json(&LinkCategory { id: category_id })
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn remove_category(&self, movie_id: DbId, category_id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/movies/{movie_id}/categories/{category_id}")))
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_json("/categories", &[]).await
    }

    async fn list_categories_with_movies(&self) -> Result<Vec<CategoryWithMovies>, ClientError> {
        self.get_json("/categories", &with_movies()).await
    }

    async fn get_category(&self, id: DbId) -> Result<Category, ClientError> {
        self.get_json(&format!("/categories/{id}"), &[]).await
    }

    async fn get_category_with_movies(&self, id: DbId) -> Result<CategoryWithMovies, ClientError> {
        self.get_json(&format!("/categories/{id}"), &with_movies())
            .await
    }
}
