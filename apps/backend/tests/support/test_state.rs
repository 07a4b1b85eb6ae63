use parcel_backend::config::db::DbKind;
use parcel_backend::infra::state::{build_state, StateBuilder};
use parcel_backend::{AppError, AppState, SecurityConfig};

/// Secret shared by every test state and the token helpers.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Builder over a private in-memory SQLite database with migrations applied.
pub fn test_state_builder() -> StateBuilder {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder().build().await
}
