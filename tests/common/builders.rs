//! Test builders: stores, services, and HTTP requests.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use advice_core::{
    error::StoreError, store::MemoryStore, Entry, EntryService, EntryStore, NewEntry,
};

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// A store whose every call fails, standing in for an unreachable database.
#[derive(Debug, Default)]
pub struct FailingStore;

impl EntryStore for FailingStore {
    async fn insert_one(&self, _entry: NewEntry) -> Result<Entry, StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused: db.internal:27017",
        )))
    }

    async fn find_newest_first(&self) -> Result<Vec<Entry>, StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused: db.internal:27017",
        )))
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Wraps a [`MemoryStore`] and counts calls, so tests can prove a rejected
/// request never reached the store.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    inserts: AtomicUsize,
    closes: AtomicUsize,
}

impl RecordingStore {
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl EntryStore for RecordingStore {
    async fn insert_one(&self, entry: NewEntry) -> Result<Entry, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_one(entry).await
    }

    async fn find_newest_first(&self) -> Result<Vec<Entry>, StoreError> {
        self.inner.find_newest_first().await
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}

// ---------------------------------------------------------------------------
// Services + routers
// ---------------------------------------------------------------------------

pub fn service<S: EntryStore>(store: S) -> Arc<EntryService<S>> {
    Arc::new(EntryService::new(store))
}

pub fn memory_app() -> (Arc<EntryService<RecordingStore>>, Router) {
    let svc = service(RecordingStore::default());
    let app = advice::router(svc.clone());
    (svc, app)
}

pub fn failing_app() -> Router {
    advice::router(service(FailingStore))
}

/// Insert `text` directly through the store with an explicit timestamp.
pub async fn seed<S: EntryStore>(store: &S, text: &str, timestamp: DateTime<Utc>) -> Entry {
    store
        .insert_one(NewEntry {
            text: text.to_string(),
            timestamp,
        })
        .await
        .expect("seed insert")
}

/// A fixed base instant plus `secs` seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap() + Duration::seconds(secs)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A response reduced to what the harnesses assert on.
#[derive(Debug)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> JsonResponse {
    let response = app.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response is JSON")
    };
    JsonResponse { status, body }
}

pub async fn get_entries(app: &Router) -> JsonResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/entries")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, body: Value) -> JsonResponse {
    post_raw(app, body.to_string()).await
}

pub async fn post_raw(app: &Router, body: impl Into<String>) -> JsonResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/entries")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

pub async fn request(app: &Router, method: Method, uri: &str) -> JsonResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// The `text` values of a `GET /entries` body, in response order.
pub fn texts(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("list body is an array")
        .iter()
        .map(|e| e["text"].as_str().expect("text is a string").to_string())
        .collect()
}
