//! Service bootstrap shared by the `bookshelf` and `bookshelf-cli` binaries.

use std::sync::Arc;

use anyhow::Context;
use bookshelf_db::{DbModule, PgPool};
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Core `db` module plus every project module, all sharing `pool`.
pub fn build_registry(pool: PgPool) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DbModule::new(pool.clone())));
    modules::register_all(&mut registry, pool);
    registry
}

/// Run the service until a shutdown signal arrives.
///
/// Modules are stopped after the server drains, even when serving failed.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.endpoint(),
        "bookshelf bootstrap starting"
    );

    let pool = bookshelf_db::connect_lazy(&settings.database);
    let registry = build_registry(pool);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_core_modules(&ctx).await?;
    registry.init_custom_modules(&ctx).await?;
    registry.start_core_modules(&ctx).await?;
    registry.start_custom_modules(&ctx).await?;

    tracing::info!(
        core = registry.core_module_count(),
        custom = registry.custom_module_count(),
        "bookshelf bootstrap complete"
    );

    let served = bookshelf_http::start_server(&registry, &settings, bookshelf_http::shutdown_signal())
        .await
        .context("bookshelf server terminated abnormally");

    registry.stop_custom_modules().await?;
    registry.stop_core_modules().await?;

    served
}
