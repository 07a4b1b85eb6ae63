use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Shared, immutable per-process resources handed to every request.
///
/// The database connection is injected here once at start-up and closed
/// explicitly on shutdown; handlers and the access gate only ever borrow it.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self { db, security }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the connection pool. Consumes the state so nothing can use it afterwards.
    pub async fn close(self) -> Result<(), sea_orm::DbErr> {
        self.db.close().await
    }
}
