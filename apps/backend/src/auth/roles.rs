use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Role stored on a user record.
///
/// Handlers never compare role strings; they name a required `Role` and ask
/// the caller's role whether it [`grants`](Role::grants) it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "delivery_man")]
    DeliveryMan,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Customer, Role::Admin, Role::DeliveryMan];

    /// Whether a caller holding `self` may run an operation requiring `required`.
    ///
    /// Roles are disjoint: admin does not imply delivery_man.
    pub fn grants(self, required: Role) -> bool {
        self == required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
            Role::DeliveryMan => "delivery_man",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidEnumValue,
                    format!("Unknown role '{s}'"),
                )
            })
    }
}
