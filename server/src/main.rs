#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics on bad input.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;
use std::sync::Arc;

use bearer_auth::{
    auth::AuthService, config::ServerConfig, http::router, user_store::InMemoryUserStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bearer_auth=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: algorithm={}, token_expiry_secs={}, listen_port={}",
        config.signing.algorithm().name(),
        config.signing.expiry_secs(),
        config.listen_port
    );

    let store = match &config.users_file {
        Some(path) => match InMemoryUserStore::from_json_file(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Failed to load users from {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("AUTH_USERS_FILE not set; starting with an empty user store");
            InMemoryUserStore::new()
        }
    };

    match store.len() {
        Ok(count) => tracing::info!("User store ready with {count} users"),
        Err(e) => {
            tracing::error!("User store unavailable: {e}");
            std::process::exit(1);
        }
    }

    let listen_port = config.listen_port;
    let auth = Arc::new(AuthService::new(Arc::new(store), Arc::new(config.signing)));
    let app = router(auth);

    let addr = SocketAddr::from(([127, 0, 0, 1], listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
