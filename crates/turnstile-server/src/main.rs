use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use turnstile_core::{PasswordHasher, TokenService};
use turnstile_db::{Database, DatabaseConfig};
use turnstile_server::config::ServerConfig;
use turnstile_server::routes;
use turnstile_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("turnstile=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let db = Database::connect(&db_config).await?;
    db.migrate().await?;

    let state = Arc::new(AppState {
        store: db.user_repo(),
        hasher: PasswordHasher::new(config.bcrypt_cost)?,
        tokens: TokenService::new(&config.secret, config.token_ttl)?,
    });

    let app = routes::app(state, &config);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
