use std::sync::Arc;

use tokio::signal;
use tracing::info;

use cargohub_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(&cfg);

    let db = api::db::establish_connection(&cfg).await?;
    if cfg.auto_migrate {
        api::db::init_schema(&db).await?;
        info!("schema initialized");
    }

    let state = api::AppState::new(Arc::new(db), cfg.clone());
    let app = api::app_router(state);

    let listener = tokio::net::TcpListener::bind(cfg.server_addr()).await?;
    info!(addr = %cfg.server_addr(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
