//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{auth::Password, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Roles that can sign in to the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Designer,
}

/// Roles allowed to manage the catalog.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Roles allowed to manage orders.
pub const STAFF: &[Role] = &[Role::Admin, Role::Designer];

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Designer => "designer",
        }
    }

    /// Check this role against an allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`Forbidden`] when the role is not in `allowed`.
    pub fn authorize(self, allowed: &[Role]) -> Result<(), Forbidden> {
        if allowed.contains(&self) {
            Ok(())
        } else {
            Err(Forbidden { role: self })
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "designer" => Ok(Self::Designer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Raised when a principal's role is outside the required set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("role `{role}` is not permitted")]
pub struct Forbidden {
    pub role: Role,
}

/// The authenticated actor behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_uuid: UserUuid,
    pub username: String,
    pub role: Role,
    pub name: String,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub role: Role,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&UserRecord> for Principal {
    fn from(user: &UserRecord) -> Self {
        Self {
            user_uuid: user.uuid,
            username: user.username.clone(),
            role: user.role,
            name: user.name.clone(),
        }
    }
}

/// A user row together with its stored password verifier.
#[derive(Debug, Clone)]
pub(crate) struct StoredUser {
    pub user: UserRecord,
    pub password_hash: String,
}

/// Successful login result.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserRecord,
}

/// Profile fields a user may change about themself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current: Password,
    pub new: Password,
}

/// Account ensured to exist at startup.
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub username: String,
    pub password: Password,
    pub role: Role,
    pub name: String,
    pub email: Option<String>,
}
