//! Auth Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sowraashi_app::auth::{Principal, UserRecord};

/// A staff account, without credentials.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub username: String,

    /// `admin` or `designer`
    pub role: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            username: user.username,
            role: user.role.to_string(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// The caller as described by their token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrincipalResponse {
    pub user_uuid: Uuid,
    pub username: String,
    pub role: String,
    pub name: String,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        PrincipalResponse {
            user_uuid: principal.user_uuid.into(),
            username: principal.username.clone(),
            role: principal.role.to_string(),
            name: principal.name.clone(),
        }
    }
}
