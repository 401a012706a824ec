//! Change Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use sowraashi_app::auth::{AuthServiceError, Password, PasswordChange};

use crate::{auth::into_status_error, extensions::*, responses::MessageResponse, state::State};

/// Change Password Request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest { .. }")
    }
}

/// Change Password Handler
#[endpoint(
    tags("auth"),
    summary = "Change Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields or wrong current password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ChangePasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let ChangePasswordRequest {
        current_password,
        new_password,
    } = json.into_inner();

    let change = PasswordChange {
        current: Password::from(current_password),
        new: Password::from(new_password),
    };

    if change.current.is_blank() || change.new.is_blank() {
        return Err(StatusError::bad_request().brief("Current and new password are required"));
    }

    state
        .app
        .auth
        .change_password(principal.user_uuid, change)
        .await
        .map_err(|error| match error {
            AuthServiceError::InvalidCredentials => {
                StatusError::bad_request().brief("Current password is incorrect")
            }
            other => into_status_error(other),
        })?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}
