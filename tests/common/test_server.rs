//! Real TCP servers for client-facing tests.
//!
//! [`TestServer::start`] runs [`advice::serve_on`] on 127.0.0.1 with a random
//! port and a oneshot shutdown trigger. [`TestServer::failing`] runs a bare
//! axum router that answers every `/entries` call with a fixed error, for
//! exercising client error handling.
//!
//! Call [`TestServer::stop`] at the end of a test and check its result; it
//! carries any error from the server task.

use std::{net::SocketAddr, sync::Arc};

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use advice_core::{EntryService, EntryStore};

/// Handle to a running server.
pub struct TestServer<S> {
    addr: SocketAddr,
    service: Option<Arc<EntryService<S>>>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl<S: EntryStore> TestServer<S> {
    /// Serve `store` through the real router. Returns once listening.
    pub async fn start(store: S) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let service = Arc::new(EntryService::new(store));
        let (tx, rx) = oneshot::channel::<()>();

        let task = tokio::spawn(advice::serve_on(listener, service.clone(), async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            service: Some(service),
            shutdown: Some(tx),
            task,
        }
    }

    pub fn service(&self) -> &Arc<EntryService<S>> {
        self.service.as_ref().expect("real server has a service")
    }
}

impl TestServer<()> {
    /// Serve `status` with `{"error": message}` for both `/entries` methods.
    pub async fn failing(status: StatusCode, message: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let reply = move || async move { (status, Json(json!({ "error": message }))) };
        let app = Router::new().route("/entries", get(reply).post(reply));

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await?;
            Ok(())
        });

        Self {
            addr,
            service: None,
            shutdown: Some(tx),
            task,
        }
    }
}

impl<S> TestServer<S> {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Trigger graceful shutdown and wait for the server task to finish.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        (&mut self.task).await.expect("server task panicked")
    }
}
