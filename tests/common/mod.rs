//! Shared fixtures for the HTTP contract tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use bookshelf_app::books::{self, Book, BookRequest, BookStore};
use bookshelf_kernel::ModuleRegistry;
use serde_json::Value;
use tower::ServiceExt;

/// In-memory `BookStore` with serial ids starting at 1.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i32,
    books: BTreeMap<i32, Book>,
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create(&self, book: &BookRequest) -> anyhow::Result<i32> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.books.insert(id, Book::new(id, book.clone()));
        Ok(id)
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Book>> {
        Ok(self.state.lock().unwrap().books.get(&id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        Ok(self.state.lock().unwrap().books.values().cloned().collect())
    }

    async fn update(&self, id: i32, book: &BookRequest) -> anyhow::Result<u64> {
        let mut state = self.state.lock().unwrap();
        match state.books.get_mut(&id) {
            Some(existing) => {
                *existing = Book::new(id, book.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        Ok(self.state.lock().unwrap().books.remove(&id).map_or(0, |_| 1))
    }
}

/// Store whose every call fails the way an unreachable database does.
pub struct FailingStore;

#[async_trait]
impl BookStore for FailingStore {
    async fn create(&self, _book: &BookRequest) -> anyhow::Result<i32> {
        Err(unreachable_db())
    }

    async fn get(&self, _id: i32) -> anyhow::Result<Option<Book>> {
        Err(unreachable_db())
    }

    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        Err(unreachable_db())
    }

    async fn update(&self, _id: i32, _book: &BookRequest) -> anyhow::Result<u64> {
        Err(unreachable_db())
    }

    async fn delete(&self, _id: i32) -> anyhow::Result<u64> {
        Err(unreachable_db())
    }
}

/// Store whose every call takes `delay` before delegating to a `MemoryStore`.
pub struct SlowStore {
    pub delay: std::time::Duration,
    pub inner: MemoryStore,
}

impl SlowStore {
    async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl BookStore for SlowStore {
    async fn create(&self, book: &BookRequest) -> anyhow::Result<i32> {
        self.wait().await;
        self.inner.create(book).await
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Book>> {
        self.wait().await;
        self.inner.get(id).await
    }

    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        self.wait().await;
        self.inner.list().await
    }

    async fn update(&self, id: i32, book: &BookRequest) -> anyhow::Result<u64> {
        self.wait().await;
        self.inner.update(id, book).await
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        self.wait().await;
        self.inner.delete(id).await
    }
}

fn unreachable_db() -> anyhow::Error {
    anyhow::anyhow!("connection refused").context("failed to acquire database connection")
}

/// Full application router over the given store.
pub fn app(store: Arc<dyn BookStore>) -> Router {
    let mut registry = ModuleRegistry::new();
    registry.register_custom(books::create_module(store));
    bookshelf_http::build_router(&registry)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse { status, body }
}
