use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use ledger_rs::{
    coa,
    config::Config,
    routes::{self, AppState},
    store::{DocumentStore, MemoryStore},
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting ledger service...");

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration from environment");

    tracing::info!(
        "Configuration loaded: host={}, port={}, store_type={}",
        config.host,
        config.port,
        config.store_type
    );

    // Select the document store backend
    let store: Arc<dyn DocumentStore> = match config.store_type.to_lowercase().as_str() {
        "memory" => {
            tracing::info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        }
        other => panic!("Invalid STORE_TYPE: {other}. Must be 'memory'"),
    };

    // Seed the chart of accounts
    coa::seed_chart(store.as_ref())
        .await
        .expect("Failed to seed chart of accounts");

    // Build the application router
    let app = routes::router(AppState::new(store, &config)).layer(
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    );

    // Bind to the configured address
    let addr = config.bind_addr();
    tracing::info!("Ledger service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    // Start the server
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
