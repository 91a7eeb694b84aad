use serde::{Deserialize, Serialize};

/// A catalogued book as stored in the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-generated identifier, assigned once at insertion
    pub id: i32,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Integer description column, exposed as `desc`
    #[serde(rename = "desc")]
    pub description: i32,
}

impl Book {
    pub fn new(id: i32, request: BookRequest) -> Self {
        Self {
            id,
            title: request.title,
            author: request.author,
            description: request.description,
        }
    }
}

/// Request body for creating or replacing a book.
///
/// Absent fields take their zero value (`""` or `0`), so all three columns
/// are always written together. An `id` in the body is ignored; the path or
/// the store decides it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    #[serde(rename = "desc")]
    pub description: i32,
}
