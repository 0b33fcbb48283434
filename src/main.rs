//! Server binary: loads config, prepares the store, seeds the admin account and serves the API.

use inventory_admin::{
    app, ensure_database_exists, ensure_tables, AppConfig, AppState, MemoryStore, PgStore, Store,
    UploadStore, UserService,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("inventory_admin=info,tower_http=info")
            }),
        )
        .init();

    let store: Arc<dyn Store> = if config.uses_memory_store() {
        tracing::warn!("using in-memory store; data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        ensure_database_exists(&config.database_url).await?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;
        ensure_tables(&pool).await?;
        Arc::new(PgStore::new(pool))
    };
    UserService::seed_admin(store.as_ref(), &config.admin).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let state = AppState::new(store, UploadStore::new(&config.upload_dir));
    let router = app(state, config.max_upload_bytes);

    let listener = TcpListener::bind(config.server_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
