use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

/// Open a connection pool for `kind` and bring the schema up to date.
///
/// This is the only place the process creates a database connection; the
/// result is injected into `AppState` and closed through `AppState::close`.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;

    let mut options = ConnectOptions::new(url);
    options
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    if kind == DbKind::SqliteMemory {
        // Every SQLite in-memory connection is its own database: pin the pool to one.
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await.map_err(|e| {
        AppError::db_unavailable(format!("failed to connect to {kind:?} database: {e}"))
    })?;

    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migrations failed: {e}")))?;

    info!(db_kind = ?kind, "database ready");
    Ok(conn)
}
