//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use sowraashi_app::auth::Password;

use crate::{
    auth::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub success: bool,

    /// Bearer token for subsequent requests
    pub token: String,

    /// When the token stops being accepted
    pub expires_at: String,
    pub user: UserResponse,
}

/// Login Handler
///
/// Exchanges a username and password for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Username or password missing"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid username or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let LoginRequest { username, password } = json.into_inner();
    let password = Password::from(password);

    if username.trim().is_empty() || password.is_blank() {
        return Err(StatusError::bad_request().brief("Username and password required"));
    }

    let session = state
        .app
        .auth
        .login(username.trim(), password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        expires_at: session.expires_at.to_string(),
        user: session.user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use sowraashi_app::auth::{
        AuthServiceError, LoginSession, MockAuthService, Role, UserRecord, UserUuid,
    };

    use crate::test_helpers::TestServices;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        TestServices::new()
            .with_auth(auth)
            .service(Router::with_path("auth/login").post(handler))
    }

    fn admin() -> UserRecord {
        UserRecord {
            uuid: UserUuid::new(),
            username: "admin".to_string(),
            role: Role::Admin,
            name: "Administrator".to_string(),
            email: None,
            phone: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_login_returns_token_and_user() -> TestResult {
        let user = admin();
        let uuid = user.uuid;

        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|username, password| {
                username == "admin" && *password == Password::new("SecureAdminPassword123!")
            })
            .return_once(move |_, _| {
                Ok(LoginSession {
                    token: "signed.jwt.token".to_string(),
                    expires_at: Timestamp::UNIX_EPOCH,
                    user,
                })
            });

        let response: LoginResponse = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": " admin ", "password": "SecureAdminPassword123!" }))
            .send(&make_service(auth))
            .await
            .take_json()
            .await?;

        assert!(response.success, "expected success flag");
        assert_eq!(response.token, "signed.jwt.token");
        assert_eq!(response.user.uuid, uuid.into_uuid());
        assert_eq!(response.user.role, "admin");

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_returns_401_without_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "admin", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(!body.contains("token\""), "no token expected in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_password_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "admin", "password": "  " }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_fields_return_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "admin" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
