//! Postgres connectivity: connection parameters, the shared pool, and the
//! `db` core module.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::{config::SslMode, Config, NoTls};

use bookshelf_kernel::{settings::DatabaseSettings, InitCtx, Module};

/// Pooled Postgres handle shared by every store.
pub type PgPool = bb8::Pool<PostgresConnectionManager<NoTls>>;

/// A connection checked out of [`PgPool`]; returned to the pool on drop.
pub type PgConnection<'a> = bb8::PooledConnection<'a, PostgresConnectionManager<NoTls>>;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Translate settings into driver configuration. TLS is always disabled;
/// empty credentials are left unset rather than sent as empty strings.
pub fn pg_config(settings: &DatabaseSettings) -> Config {
    let mut config = Config::new();
    config
        .host(&settings.host)
        .port(settings.port)
        .ssl_mode(SslMode::Disable)
        .connect_timeout(CONNECTION_TIMEOUT)
        .application_name("bookshelf");

    if !settings.user.is_empty() {
        config.user(&settings.user);
    }
    if !settings.password.is_empty() {
        config.password(&settings.password);
    }
    if !settings.dbname.is_empty() {
        config.dbname(&settings.dbname);
    }

    config
}

/// Build the pool without opening any connection.
///
/// Connections are established on first checkout, so an unreachable
/// database surfaces as a per-request error instead of a startup failure.
/// Must be called from within a tokio runtime (the pool spawns its reaper).
pub fn connect_lazy(settings: &DatabaseSettings) -> PgPool {
    let manager = PostgresConnectionManager::new(pg_config(settings), NoTls);
    bb8::Pool::builder()
        .max_size(settings.pool_max_size.max(1))
        .connection_timeout(CONNECTION_TIMEOUT)
        .build_unchecked(manager)
}

/// Check out one connection and run `SELECT 1`.
pub async fn ping(pool: &PgPool) -> anyhow::Result<()> {
    let conn = pool
        .get()
        .await
        .context("failed to acquire database connection")?;
    conn.simple_query("SELECT 1")
        .await
        .context("database did not answer ping")?;
    Ok(())
}

/// Core module owning the pool lifecycle.
pub struct DbModule {
    pool: PgPool,
}

impl DbModule {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let endpoint = ctx.settings.database.endpoint();
        // Unreachable at boot is not fatal; requests report it as a 500.
        match ping(&self.pool).await {
            Ok(()) => tracing::info!(module = self.name(), %endpoint, "database reachable"),
            Err(err) => tracing::warn!(
                module = self.name(),
                %endpoint,
                error = %format!("{:#}", err),
                "database not reachable at startup"
            ),
        }
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let state = self.pool.state();
        tracing::info!(
            module = self.name(),
            connections = state.connections,
            idle = state.idle_connections,
            "database pool released"
        );
        Ok(())
    }
}
