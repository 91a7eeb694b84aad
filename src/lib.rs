//! Bookshelf application library
//!
//! The `books` resource module, its Postgres store, and the bootstrap that
//! wires them into the HTTP server.

pub mod app;
pub mod modules;

pub use app::{build_registry, serve};
pub use modules::books;
