//! Privilege check: one user-store lookup per gated request.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::claims::CallerIdentity;
use crate::auth::roles::Role;
use crate::errors::domain::DomainError;
use crate::repos::users;

/// The two user fields the gate reads, plus the key handlers need afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<users::User> for UserRecord {
    fn from(m: users::User) -> Self {
        Self {
            id: m.id,
            email: m.email,
            role: m.role,
        }
    }
}

/// Read access to user records by email.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;
}

#[async_trait]
impl UserDirectory for DatabaseConnection {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        Ok(users::find_by_email(self, email).await?.map(UserRecord::from))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    UnknownUser,
    InsufficientRole { actual: Role },
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::UnknownUser => "unknown_user",
            DenyReason::InsufficientRole { .. } => "insufficient_role",
        }
    }
}

/// Outcome of a privilege check. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow(UserRecord),
    Deny(DenyReason),
}

/// Decide whether `identity` currently holds `required`.
///
/// Performs exactly one `find_by_email` call and does not cache, so a role
/// change applies to the caller's next request.
pub async fn authorize<D>(
    directory: &D,
    identity: &CallerIdentity,
    required: Role,
) -> Result<AccessDecision, DomainError>
where
    D: UserDirectory + ?Sized,
{
    let decision = match directory.find_by_email(&identity.email).await? {
        None => AccessDecision::Deny(DenyReason::UnknownUser),
        Some(user) if user.role.grants(required) => AccessDecision::Allow(user),
        Some(user) => AccessDecision::Deny(DenyReason::InsufficientRole { actual: user.role }),
    };
    Ok(decision)
}
