//! Profile Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use sowraashi_app::auth::ProfileUpdate;

use crate::{
    auth::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Get Profile Handler
///
/// Returns the caller's account.
#[endpoint(
    tags("auth"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn get(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .auth
        .get_profile(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

/// Update Profile Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Profile Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileUpdatedResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Update Profile Handler
///
/// Blank fields are left unchanged.
#[endpoint(
    tags("auth"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid profile data"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn update(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .auth
        .update_profile(principal.user_uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        user: user.into(),
    }))
}
