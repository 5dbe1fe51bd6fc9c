use std::net::SocketAddr;
use std::sync::Arc;

use marquee_db::{InMemoryStore, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_api::app::build_app;
use marquee_api::config::ServerConfig;
use marquee_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=debug,marquee_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let state = build_state(&config).await;
    let app = build_app(state);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "marquee-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("marquee-api stopped");
}

/// Postgres when `DATABASE_URL` is set, otherwise the seeded in-memory catalog.
async fn build_state(config: &ServerConfig) -> AppState {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, serving the in-memory catalog");
        return AppState::new(
            Arc::new(InMemoryStore::with_default_categories()),
            config.clone(),
        );
    };

    let pool = marquee_db::create_pool(database_url)
        .await
        .expect("Failed to connect to database");
    marquee_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    marquee_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Postgres catalog ready, migrations applied");

    AppState::new(Arc::new(PgStore::new(pool)), config.clone())
}

/// Resolves on SIGINT, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("SIGINT received, draining connections");
        }
        () = terminate => {
            tracing::info!("SIGTERM received, draining connections");
        }
    }
}
