pub mod books;

use std::sync::Arc;

use bookshelf_db::PgPool;
use bookshelf_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, pool: PgPool) {
    registry.register_custom(books::create_module(Arc::new(books::PgBookStore::new(pool))));
}
