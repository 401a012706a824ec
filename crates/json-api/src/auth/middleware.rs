//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Resolve the bearer token to a principal, answering 401 when that fails.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        debug!(path = %req.uri().path(), "request without bearer token");

        return reject(res, ctrl, StatusError::unauthorized().brief("Access token required"));
    };

    let verified = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state.app.auth.verify_token(token).await,
        Err(error) => return reject(res, ctrl, error),
    };

    match verified {
        Ok(principal) => depot.insert_principal(principal),
        Err(error) => return reject(res, ctrl, into_status_error(error)),
    }

    ctrl.call_next(req, depot, res).await;
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, error: StatusError) {
    res.render(error);
    ctrl.skip_rest();
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use sowraashi_app::auth::{
        AuthServiceError, DEFAULT_TOKEN_TTL, MockAuthService, Role, TokenIssuer,
    };

    use crate::test_helpers::{TestServices, principal};

    use super::*;

    #[salvo::handler]
    async fn echo_principal(depot: &mut Depot, res: &mut Response) {
        let username = depot
            .principal_or_401()
            .map_or_else(|_| "missing".to_string(), |p| p.username.clone());

        res.render(username);
    }

    fn make_service(auth: MockAuthService) -> Service {
        TestServices::new()
            .with_auth(auth)
            .service(Router::new().hoop(handler).push(Router::new().get(echo_principal)))
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify_token().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify_token().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_token_returns_401() -> TestResult {
        let rejection = TokenIssuer::new(b"test-secret", DEFAULT_TOKEN_TTL)
            .verify("abc123")
            .err()
            .ok_or("expected the token to be rejected")?;

        let mut auth = MockAuthService::new();

        auth.expect_verify_token()
            .once()
            .withf(|token| token == "abc123")
            .return_once(move |_| Err(AuthServiceError::InvalidToken(rejection)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_principal() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify_token()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(principal("priya", Role::Designer)));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "priya");

        Ok(())
    }
}
