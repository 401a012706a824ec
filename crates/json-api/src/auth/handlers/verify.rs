//! Verify Token Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{auth::PrincipalResponse, extensions::*};

/// Verify Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyResponse {
    pub message: String,
    pub user: PrincipalResponse,
}

/// Verify Token Handler
///
/// Echoes the principal carried by a still-valid token.
#[endpoint(
    tags("auth"),
    summary = "Verify Token",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Token is valid"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing, invalid or expired token"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VerifyResponse>, StatusError> {
    let principal = depot.principal_or_401()?;

    Ok(Json(VerifyResponse {
        message: "Token is valid".to_string(),
        user: principal.into(),
    }))
}
