pub mod handlers;
pub mod models;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use handlers::SharedStore;
pub use models::{Book, BookRequest};
pub use store::{BookStore, PgBookStore};

/// The `books` resource: create, read, list, replace, and delete
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_books).post(handlers::create_book))
            .route(
                "/{bookID}",
                get(handlers::get_book)
                    .put(handlers::update_book)
                    .delete(handlers::delete_book),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let literal = |description: &str, value: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "type": "string", "enum": [value] }
                    }
                }
            })
        };
        let book_id = json!({
            "name": "bookID",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int32" }
        });
        let request_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookRequest" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every stored book, possibly empty",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": error("Store failure")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": request_body,
                        "responses": {
                            "201": literal("Book created", "Created"),
                            "400": error("Malformed body"),
                            "500": error("Store failure")
                        }
                    }
                },
                "/{bookID}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "404": error("No book with this id"),
                            "500": error("Store failure")
                        }
                    },
                    "put": {
                        "summary": "Replace a book's title, author, and description",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "requestBody": request_body,
                        "responses": {
                            "200": literal("Book updated", "Updated"),
                            "400": error("Malformed body"),
                            "404": error("No book with this id"),
                            "500": error("Store failure")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": literal("Book deleted", "Deleted"),
                            "404": error("No book with this id"),
                            "500": error("Store failure")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int32",
                                "description": "Store-generated identifier"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "desc": {
                                "type": "integer",
                                "format": "int32",
                                "description": "Description value"
                            }
                        },
                        "required": ["id", "title", "author", "desc"]
                    },
                    "BookRequest": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "desc": { "type": "integer", "format": "int32" }
                        },
                        "description": "Absent fields are stored as \"\" or 0"
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module over the given store
pub fn create_module(store: SharedStore) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
