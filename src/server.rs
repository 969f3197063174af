use std::{future::Future, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use advice_core::{config::Config, store, EntryService, EntryStore};

use crate::routes::{create_entry, list_entries, method_not_allowed, not_found, SharedService};

/// Build the application router around an already-connected service.
pub fn router<S: EntryStore>(service: SharedService<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/entries", get(list_entries::<S>).post(create_entry::<S>))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Connect the configured store, bind the configured address and serve until
/// Ctrl+C or SIGTERM.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to entry store...");
    let store = store::connect(&config.store)
        .await
        .context("failed to connect to entry store")?;
    let service = Arc::new(EntryService::new(store));

    let address = config.server.bind_addr();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    serve_on(listener, service, shutdown_signal()).await
}

/// Serve on `listener` until `shutdown` resolves, then close the store.
pub async fn serve_on<S, F>(
    listener: TcpListener,
    service: SharedService<S>,
    shutdown: F,
) -> anyhow::Result<()>
where
    S: EntryStore,
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    info!("Server running on http://{address}");

    axum::serve(listener, router(service.clone()))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutting down, closing entry store");
    service.shutdown().await.context("failed to close entry store")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
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
}
