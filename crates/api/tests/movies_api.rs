//! HTTP-level tests for the movie endpoints over mocked stores.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Each test arranges the store outcome
//! (success, absent, failure) and asserts status, body and store calls.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, delete, get, movies_app, post_json, post_raw};
use marquee_core::catalog::{Category, CreateMovie, Movie, MovieWithCategories};
use marquee_core::search::SearchFilter;
use marquee_db::{MockMovieStore, StoreError};
use mockall::predicate::eq;
use serde_json::json;

fn movie(id: i64, title: &str, release_year: i32) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        release_year,
    }
}

fn store_down() -> StoreError {
    StoreError::Unavailable("Database error".into())
}

// ---------------------------------------------------------------------------
// GET /movies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_movies_returns_store_rows() {
    let mut store = MockMovieStore::new();
    store.expect_get_all().times(1).returning(|| {
        Ok(vec![
            movie(1, "The Great Escape", 1964),
            movie(2, "Return to Oz", 1971),
            movie(3, "Around the World in 80 Days", 1973),
        ])
    });

    let response = get(movies_app(store), "/api/v1/movies").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(
        json[0],
        json!({"id": 1, "title": "The Great Escape", "release_year": 1964})
    );
}

#[tokio::test]
async fn list_movies_with_categories_nests_categories() {
    let mut store = MockMovieStore::new();
    store.expect_get_all_with_categories().returning(|| {
        Ok(vec![MovieWithCategories {
            id: 1,
            title: "The Great Escape".into(),
            release_year: 1964,
            categories: vec![
                Category {
                    id: 1,
                    name: "Action/Adventure".into(),
                },
                Category {
                    id: 2,
                    name: "History".into(),
                },
            ],
        }])
    });

    let response = get(movies_app(store), "/api/v1/movies?withCategories=true").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!([{
            "id": 1,
            "title": "The Great Escape",
            "release_year": 1964,
            "categories": [
                {"id": 1, "name": "Action/Adventure"},
                {"id": 2, "name": "History"},
            ],
        }])
    );
}

#[tokio::test]
async fn with_categories_takes_precedence_over_category() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_all_with_categories()
        .times(1)
        .returning(|| Ok(vec![]));
    store.expect_get_by_category().never();

    let response = get(
        movies_app(store),
        "/api/v1/movies?withCategories=true&category=7",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn with_categories_flag_is_switched_on_by_presence() {
    for query in [
        "withCategories",
        "withCategories=",
        "withCategories=1",
        "withCategories=true",
    ] {
        let mut store = MockMovieStore::new();
        store
            .expect_get_all_with_categories()
            .times(1)
            .returning(|| Ok(vec![]));
        store.expect_get_all().never();

        let response = get(movies_app(store), &format!("/api/v1/movies?{query}")).await;

        assert_eq!(response.status(), StatusCode::OK, "query: {query}");
        assert_eq!(body_json(response).await, json!([]), "query: {query}");
    }
}

#[tokio::test]
async fn with_categories_false_lists_plain_movies() {
    for query in ["withCategories=false", "withCategories=0"] {
        let mut store = MockMovieStore::new();
        store.expect_get_all_with_categories().never();
        store.expect_get_all().times(1).returning(|| Ok(vec![]));

        let response = get(movies_app(store), &format!("/api/v1/movies?{query}")).await;

        assert_eq!(response.status(), StatusCode::OK, "query: {query}");
    }
}

#[tokio::test]
async fn list_movies_with_categories_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_all_with_categories()
        .returning(|| Err(store_down()));

    let response = get(movies_app(store), "/api/v1/movies?withCategories=true").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn list_movies_filters_by_category() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_by_category()
        .with(eq(7))
        .times(1)
        .returning(|_| Ok(vec![movie(3, "Special Movie", 1923)]));

    let response = get(movies_app(store), "/api/v1/movies?category=7").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{"id": 3, "title": "Special Movie", "release_year": 1923}])
    );
}

#[tokio::test]
async fn list_movies_by_category_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_by_category()
        .returning(|_| Err(store_down()));

    let response = get(movies_app(store), "/api/v1/movies?category=7").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn list_movies_non_numeric_category_returns_400() {
    let mut store = MockMovieStore::new();
    store.expect_get_by_category().never();
    store.expect_get_all().never();

    let response = get(movies_app(store), "/api/v1/movies?category=drama").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn list_movies_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store.expect_get_all().returning(|| Err(store_down()));

    let response = get(movies_app(store), "/api/v1/movies").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// GET /movies/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_movie_returns_record() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_by_id()
        .with(eq(2))
        .returning(|_| Ok(Some(movie(2, "Return to Oz", 1971))));

    let response = get(movies_app(store), "/api/v1/movies/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": 2, "title": "Return to Oz", "release_year": 1971})
    );
}

#[tokio::test]
async fn get_absent_movie_returns_404_with_empty_body() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_by_id()
        .with(eq(999))
        .returning(|_| Ok(None));

    let response = get(movies_app(store), "/api/v1/movies/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn get_movie_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store.expect_get_by_id().returning(|_| Err(store_down()));

    let response = get(movies_app(store), "/api/v1/movies/2").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn get_movie_non_numeric_id_returns_400() {
    let mut store = MockMovieStore::new();
    store.expect_get_by_id().never();

    let response = get(movies_app(store), "/api/v1/movies/twelve").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn get_movie_with_categories() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_by_id_with_categories()
        .with(eq(12))
        .times(1)
        .returning(|_| {
            Ok(Some(MovieWithCategories {
                id: 12,
                title: "12 Years a Slave".into(),
                release_year: 2013,
                categories: vec![Category {
                    id: 3,
                    name: "Drama".into(),
                }],
            }))
        });
    store.expect_get_by_id().never();

    let response = get(movies_app(store), "/api/v1/movies/12?withCategories=true").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "id": 12,
            "title": "12 Years a Slave",
            "release_year": 2013,
            "categories": [{"id": 3, "name": "Drama"}],
        })
    );
}

#[tokio::test]
async fn get_movie_with_bare_with_categories_flag() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_by_id_with_categories()
        .with(eq(1))
        .times(1)
        .returning(|_| {
            Ok(Some(MovieWithCategories::from_movie(movie(
                1,
                "The Great Escape",
                1964,
            ))))
        });
    store.expect_get_by_id().never();

    let response = get(movies_app(store), "/api/v1/movies/1?withCategories").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["categories"], json!([]));
}

#[tokio::test]
async fn get_absent_movie_with_categories_returns_404() {
    let mut store = MockMovieStore::new();
    store
        .expect_get_by_id_with_categories()
        .returning(|_| Ok(None));

    let response = get(movies_app(store), "/api/v1/movies/999?withCategories=true").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// POST /movies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_movie_echoes_record_with_new_id() {
    let mut store = MockMovieStore::new();
    store
        .expect_create()
        .withf(|input: &CreateMovie| input.title == "Ghostbusters" && input.release_year == 2016)
        .times(1)
        .returning(|_| Ok(30));

    let response = post_json(
        movies_app(store),
        "/api/v1/movies",
        json!({"title": "Ghostbusters", "release_year": 2016}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": 30, "title": "Ghostbusters", "release_year": 2016})
    );
}

#[tokio::test]
async fn create_movie_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store.expect_create().returning(|_| Err(store_down()));

    let response = post_json(
        movies_app(store),
        "/api/v1/movies",
        json!({"title": "Ghostbusters", "release_year": 2016}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn create_movie_missing_field_returns_400() {
    let mut store = MockMovieStore::new();
    store.expect_create().never();

    let response = post_json(
        movies_app(store),
        "/api/v1/movies",
        json!({"title": "Ghostbusters"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn create_movie_blank_title_returns_400() {
    let mut store = MockMovieStore::new();
    store.expect_create().never();

    let response = post_json(
        movies_app(store),
        "/api/v1/movies",
        json!({"title": "  ", "release_year": 2016}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_movie_malformed_json_returns_400() {
    let mut store = MockMovieStore::new();
    store.expect_create().never();

    let response = post_raw(movies_app(store), "/api/v1/movies", "{\"title\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// GET /movies/search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_with_one_category() {
    let mut store = MockMovieStore::new();
    store
        .expect_search()
        .withf(|filter: &SearchFilter| filter.title() == Some("V") && filter.category_ids() == [1])
        .times(1)
        .returning(|_| Ok(vec![]));

    let response = get(movies_app(store), "/api/v1/movies/search?title=V&category=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn search_with_many_categories() {
    let mut store = MockMovieStore::new();
    store
        .expect_search()
        .withf(|filter: &SearchFilter| {
            filter.title() == Some("V") && filter.category_ids() == [1, 2]
        })
        .times(1)
        .returning(|_| Ok(vec![]));

    let response = get(
        movies_app(store),
        "/api/v1/movies/search?title=V&category=1&category=2",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_returns_store_rows_in_store_order() {
    let mut store = MockMovieStore::new();
    store
        .expect_search()
        .withf(|filter: &SearchFilter| filter.title() == Some("pe") && filter.category_ids() == [2])
        .returning(|_| {
            Ok(vec![
                movie(9, "Peter Pan", 1953),
                movie(1, "The Great Escape", 1964),
            ])
        });

    let response = get(movies_app(store), "/api/v1/movies/search?title=pe&category=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            {"id": 9, "title": "Peter Pan", "release_year": 1953},
            {"id": 1, "title": "The Great Escape", "release_year": 1964},
        ])
    );
}

#[tokio::test]
async fn search_without_parameters_is_unconstrained() {
    let mut store = MockMovieStore::new();
    store
        .expect_search()
        .withf(|filter: &SearchFilter| *filter == SearchFilter::default())
        .returning(|_| Ok(vec![]));

    let response = get(movies_app(store), "/api/v1/movies/search").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store
        .expect_search()
        .withf(|filter: &SearchFilter| filter.category_ids() == [1, 2])
        .times(1)
        .returning(|_| Err(store_down()));

    let response = get(
        movies_app(store),
        "/api/v1/movies/search?title=V&category=1&category=2",
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn search_with_repeated_title_returns_400_without_store_call() {
    let mut store = MockMovieStore::new();
    store.expect_search().never();

    let response = get(
        movies_app(store),
        "/api/v1/movies/search?title=first&title=second",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn search_with_non_numeric_category_returns_400() {
    let mut store = MockMovieStore::new();
    store.expect_search().never();

    let response = get(movies_app(store), "/api/v1/movies/search?category=drama").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// DELETE /movies/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_movie_returns_200() {
    let mut store = MockMovieStore::new();
    store
        .expect_delete()
        .with(eq(2))
        .times(1)
        .returning(|_| Ok(()));

    let response = delete(movies_app(store), "/api/v1/movies/2").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_movie_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store.expect_delete().returning(|_| Err(store_down()));

    let response = delete(movies_app(store), "/api/v1/movies/2").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// POST /movies/{movie_id}/categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_category_returns_201_without_body() {
    let mut store = MockMovieStore::new();
    store
        .expect_link_category()
        .with(eq(13), eq(5))
        .times(1)
        .returning(|_, _| Ok(()));

    let response = post_json(
        movies_app(store),
        "/api/v1/movies/13/categories",
        json!({"id": 5}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn add_category_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store
        .expect_link_category()
        .with(eq(13), eq(5))
        .returning(|_, _| Err(store_down()));

    let response = post_json(
        movies_app(store),
        "/api/v1/movies/13/categories",
        json!({"id": 5}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn add_category_without_id_returns_400() {
    let mut store = MockMovieStore::new();
    store.expect_link_category().never();

    let response = post_json(
        movies_app(store),
        "/api/v1/movies/13/categories",
        json!({"name": "Drama"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// DELETE /movies/{movie_id}/categories/{category_id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_category_returns_204() {
    let mut store = MockMovieStore::new();
    store
        .expect_unlink_category()
        .with(eq(13), eq(5))
        .times(1)
        .returning(|_, _| Ok(()));

    let response = delete(movies_app(store), "/api/v1/movies/13/categories/5").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn remove_category_store_failure_returns_500() {
    let mut store = MockMovieStore::new();
    store
        .expect_unlink_category()
        .returning(|_, _| Err(store_down()));

    let response = delete(movies_app(store), "/api/v1/movies/13/categories/5").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn remove_category_non_numeric_ids_return_400() {
    let mut store = MockMovieStore::new();
    store.expect_unlink_category().never();

    let response = delete(movies_app(store), "/api/v1/movies/13/categories/drama").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
