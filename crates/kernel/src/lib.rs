//! Kernel primitives shared by every bookshelf crate: layered settings and
//! the module lifecycle.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
