use dotenvy::dotenv;
use teval::router::init_router;
use teval::state::AppState;
use teval_config::{ServerConfig, StorageBackend};
use teval_db::{MemoryStore, Store, init_db_pool, run_migrations};
use teval_observability::{init_logging, init_metrics, metrics_app, shutdown_tracer};
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let config = ServerConfig::from_env();

    let store = match config.storage {
        StorageBackend::Postgres => {
            let pool = init_db_pool().await;
            if config.run_migrations {
                run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                info!("Database migrations applied");
            }
            Store::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory store; all data is lost on shutdown");
            Store::memory(MemoryStore::new())
        }
    };

    let state = AppState::from_env(store);
    let mut app = init_router(state);

    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics available at /metrics");
    }

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", config.addr, e));

    info!(addr = %config.addr, storage = ?config.storage, "🚀 Server running");
    info!("📖 Scalar UI available at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    shutdown_tracer().await;
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
