use anyhow::Context;
use recipe_server::clock::SystemClock;
use recipe_server::config::{Config, StoreBackend};
use recipe_server::store::{InMemoryRecipeStore, PgRecipeStore, RecipeStore};
use recipe_server::{api, db, telemetry, AppState};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json()?;
        println!("{}", spec);
        return Ok(());
    }

    telemetry::init()?;

    let config = Config::from_env()?;

    let store: Arc<dyn RecipeStore> = match config.store {
        StoreBackend::Postgres {
            database_url,
            pool_size,
        } => {
            let pool = tokio::task::spawn_blocking(move || {
                db::create_pool(&database_url, pool_size)
            })
            .await??;
            Arc::new(PgRecipeStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory recipe store, data is lost on shutdown");
            Arc::new(InMemoryRecipeStore::new())
        }
    };

    let app = recipe_server::app(AppState::new(store, Arc::new(SystemClock)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
