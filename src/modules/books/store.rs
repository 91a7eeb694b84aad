//! Persistence seam for books.

use anyhow::Context;
use async_trait::async_trait;
use bookshelf_db::{PgConnection, PgPool};
use tokio_postgres::Row;

use super::models::{Book, BookRequest};

const INSERT_BOOK: &str =
    "INSERT INTO books (title, author, description) VALUES ($1, $2, $3) RETURNING id";
const SELECT_BOOK: &str = "SELECT id, title, author, description FROM books WHERE id = $1";
const SELECT_BOOKS: &str = "SELECT id, title, author, description FROM books";
const UPDATE_BOOK: &str =
    "UPDATE books SET title = $1, author = $2, description = $3 WHERE id = $4";
const DELETE_BOOK: &str = "DELETE FROM books WHERE id = $1";

/// Single-statement operations on the `books` table.
///
/// `update` and `delete` return the number of affected rows; callers treat
/// zero as "no such book".
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, book: &BookRequest) -> anyhow::Result<i32>;

    async fn get(&self, id: i32) -> anyhow::Result<Option<Book>>;

    /// Every row in store order; no ordering is imposed.
    async fn list(&self) -> anyhow::Result<Vec<Book>>;

    async fn update(&self, id: i32, book: &BookRequest) -> anyhow::Result<u64>;

    async fn delete(&self, id: i32) -> anyhow::Result<u64>;
}

/// [`BookStore`] over a pooled Postgres handle. Each call checks out one
/// connection and hands it back when the call returns, on error paths too.
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> anyhow::Result<PgConnection<'_>> {
        self.pool
            .get()
            .await
            .context("failed to acquire database connection")
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, book: &BookRequest) -> anyhow::Result<i32> {
        let conn = self.connection().await?;
        let row = conn
            .query_one(INSERT_BOOK, &[&book.title, &book.author, &book.description])
            .await
            .context("failed to insert book")?;
        row.try_get("id").context("failed to read generated book id")
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Book>> {
        let conn = self.connection().await?;
        let row = conn
            .query_opt(SELECT_BOOK, &[&id])
            .await
            .with_context(|| format!("failed to query book {}", id))?;
        row.as_ref().map(book_from_row).transpose()
    }

    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        let conn = self.connection().await?;
        let rows = conn
            .query(SELECT_BOOKS, &[])
            .await
            .context("failed to query books")?;
        rows.iter().map(book_from_row).collect()
    }

    async fn update(&self, id: i32, book: &BookRequest) -> anyhow::Result<u64> {
        let conn = self.connection().await?;
        conn.execute(
            UPDATE_BOOK,
            &[&book.title, &book.author, &book.description, &id],
        )
        .await
        .with_context(|| format!("failed to update book {}", id))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        let conn = self.connection().await?;
        conn.execute(DELETE_BOOK, &[&id])
            .await
            .with_context(|| format!("failed to delete book {}", id))
    }
}

/// Decode a row in `books` column order.
fn book_from_row(row: &Row) -> anyhow::Result<Book> {
    Ok(Book {
        id: row.try_get(0).context("failed to decode book id")?,
        title: row.try_get(1).context("failed to decode book title")?,
        author: row.try_get(2).context("failed to decode book author")?,
        description: row.try_get(3).context("failed to decode book description")?,
    })
}
