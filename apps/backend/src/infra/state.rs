use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState` (used by both `main` and tests).
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    db_kind: DbKind,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: None,
            db_kind: DbKind::Postgres,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = kind;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // The secret is never defaulted; callers must supply it.
        let security = self
            .security_config
            .ok_or_else(|| AppError::config("security configuration is required"))?;
        let conn = connect_db(self.db_kind).await?;
        Ok(AppState::new(conn, security))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
