use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

/// Open the SQLite pool described by `config`.
///
/// Connections are checked out per query and returned to the pool when
/// dropped, whether the query succeeds or fails.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);

    // Every connection to `:memory:` opens its own database, so keep the
    // single connection alive for the lifetime of the pool.
    if config.url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options.connect_with(options).await
}

/// Apply pending schema migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
