//! App Router

use salvo::{
    Router,
    rate_limiter::{BasicQuota, FixedGuard, MokaStore, RateLimiter, RemoteIpIssuer},
};

use crate::{
    auth::{self, roles},
    config::http::HttpConfig,
    orders, products,
};

/// Every `/api` route behind the per-client rate limiter.
pub fn app_router(http: &HttpConfig) -> Router {
    let limiter = RateLimiter::new(
        FixedGuard::new(),
        MokaStore::new(),
        RemoteIpIssuer,
        BasicQuota::set_seconds(http.rate_limit_max_requests, http.rate_limit_window_secs()),
    );

    Router::new().hoop(limiter).push(routes())
}

pub(crate) fn routes() -> Router {
    Router::with_path("api")
        .push(auth_routes())
        .push(product_routes())
        .push(order_routes())
}

fn auth_routes() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("verify").get(auth::verify::handler))
                .push(
                    Router::with_path("profile")
                        .get(auth::profile::get)
                        .put(auth::profile::update),
                )
                .push(Router::with_path("change-password").put(auth::change_password::handler)),
        )
}

fn product_routes() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("categories/all").get(products::categories::handler))
        .push(Router::with_path("{product}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .hoop(roles::require_admin)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("stock").patch(products::stock::handler)),
                ),
        )
}

fn order_routes() -> Router {
    Router::with_path("orders")
        .push(Router::with_path("custom").post(orders::custom::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .hoop(roles::require_staff)
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("stats/overview").get(orders::stats::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .put(orders::update::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("status").patch(orders::status::handler))
                        .push(Router::with_path("payment").patch(orders::payment::handler))
                        .push(Router::with_path("payment-status").patch(orders::payment::handler))
                        .push(
                            Router::with_path("payment-success")
                                .patch(orders::payment_success::handler),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::{StatusCode, header::AUTHORIZATION},
        prelude::Service,
        test::TestClient,
    };
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use sowraashi_app::{
        auth::{AuthServiceError, DEFAULT_TOKEN_TTL, MockAuthService, Role, TokenIssuer},
        domain::{
            orders::{MockOrdersService, records::OrderUuid},
            products::MockProductsService,
        },
        pagination::Page,
    };

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{TestServices, principal},
    };

    use super::*;

    fn auth_as(role: Role) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_verify_token()
            .withf(|token| token == "valid-token")
            .returning(move |_| Ok(principal(role.as_str(), role)));

        auth.expect_verify_token()
            .returning(|token| {
                TokenIssuer::new(b"test-secret", DEFAULT_TOKEN_TTL)
                    .verify(token)
                    .map_err(AuthServiceError::InvalidToken)
            });

        auth
    }

    fn api(services: TestServices) -> Service {
        services.service(routes())
    }

    #[tokio::test]
    async fn test_catalog_is_public() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_categories().once().return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/api/products/categories/all")
            .send(&api(TestServices::new().with_products(products)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_product_writes_need_a_token() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_delete_product().never();

        let res = TestClient::delete(format!("http://example.com/api/products/{}", Uuid::now_v7()))
            .send(&api(TestServices::new().with_products(products)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_designers_cannot_manage_products() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_set_stock().never();

        let services = TestServices::new()
            .with_auth(auth_as(Role::Designer))
            .with_products(products);

        let res = TestClient::patch(format!(
            "http://example.com/api/products/{}/stock",
            Uuid::now_v7()
        ))
        .add_header(AUTHORIZATION, "Bearer valid-token", true)
        .json(&json!({ "inStock": false }))
        .send(&api(services))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_can_delete_products() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_delete_product().once().return_once(|_| Ok(()));

        let services = TestServices::new()
            .with_auth(auth_as(Role::Admin))
            .with_products(products);

        let res = TestClient::delete(format!("http://example.com/api/products/{}", Uuid::now_v7()))
            .add_header(AUTHORIZATION, "Bearer valid-token", true)
            .send(&api(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_custom_orders_skip_authentication() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_public_order()
            .once()
            .return_once(move |_| Ok(make_order(uuid)));

        let res = TestClient::post("http://example.com/api/orders/custom")
            .json(&json!({
                "name": "Asha",
                "mobile": "9876543210",
                "designDescription": "Peacock border",
                "totalBill": 5000,
                "paymentMethod": "cash",
                "presentDate": "2026-03-01",
                "deliveryDate": "2026-03-20"
            }))
            .send(&api(TestServices::new().with_orders(orders)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_order_listing_rejects_bad_token() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let services = TestServices::new()
            .with_auth(auth_as(Role::Designer))
            .with_orders(orders);

        let res = TestClient::get("http://example.com/api/orders")
            .add_header(AUTHORIZATION, "Bearer expired-token", true)
            .send(&api(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_designers_can_list_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|principal, _, _| principal.role == Role::Designer)
            .return_once(|_, _, page| Ok(Page::new(vec![], page, 0)));

        let services = TestServices::new()
            .with_auth(auth_as(Role::Designer))
            .with_orders(orders);

        let res = TestClient::get("http://example.com/api/orders")
            .add_header(AUTHORIZATION, "Bearer valid-token", true)
            .send(&api(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
