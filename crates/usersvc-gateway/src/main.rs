//! User service binary.
//!
//! Loads config (file + environment), builds the item store and metrics
//! registry, and serves the HTTP router until Ctrl-C / SIGTERM.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use usersvc_core::error::{Result, UserSvcError};
use usersvc_core::store::ItemStore;
use usersvc_gateway::config::{StoreBackend, StoreSection};
use usersvc_gateway::infra::{DynamoItemStore, MemoryItemStore};
use usersvc_gateway::{app_state::AppState, config, obs::ServiceMetrics, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "user service stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.server.listen_addr()?;

    let store = build_store(&cfg.store).await;
    let metrics = Arc::new(ServiceMetrics::new());

    tracing::info!(
        %listen,
        backend = ?cfg.store.backend,
        region = %cfg.store.region,
        table = %cfg.store.table,
        "user service starting"
    );

    let state = AppState::new(cfg, store, metrics)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| UserSvcError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| UserSvcError::Internal(format!("server failed: {e}")))
}

async fn build_store(cfg: &StoreSection) -> Arc<dyn ItemStore> {
    match cfg.backend {
        StoreBackend::Dynamodb => Arc::new(DynamoItemStore::from_config(cfg).await),
        StoreBackend::Memory => {
            tracing::warn!("memory item store selected; records are lost on restart");
            Arc::new(MemoryItemStore::new(cfg.table.clone()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
