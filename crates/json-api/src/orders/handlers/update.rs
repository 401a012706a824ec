//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use sowraashi_app::domain::orders::data::OrderUpdate;

use crate::{
    extensions::*,
    forms::FieldError,
    orders::{OrderMessageResponse, into_status_error, requests::UpdateOrderRequest},
    state::State,
};

/// Update Order Handler
///
/// Patches customer and garment details. The balance is recomputed from the
/// resulting amount and advance.
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid fields"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another designer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    let update = OrderUpdate::try_from(json.into_inner()).map_err(FieldError::into_status_error)?;

    let record = state
        .app
        .orders
        .update_order(principal, order.into(), update)
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order, balance = record.balance_amount, "updated order");

    Ok(Json(OrderMessageResponse::new(
        "Order updated successfully",
        record,
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use sowraashi_app::{
        auth::Role,
        domain::orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
    };

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{TestServices, as_role},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestServices::new().with_orders(orders).service(
            Router::with_path("orders/{order}")
                .hoop(as_role(Role::Admin))
                .put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_amounts() -> TestResult {
        let uuid = OrderUuid::new();

        let mut updated = make_order(uuid);
        updated.amount = 7000;
        updated.balance_amount = 6000;

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order()
            .once()
            .withf(move |_, o, update| {
                *o == uuid
                    && *update
                        == OrderUpdate {
                            amount: Some(7000),
                            color: Some("Teal".to_string()),
                            ..OrderUpdate::default()
                        }
            })
            .return_once(move |_, _, _| Ok(updated));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}"))
            .json(&json!({ "amount": 7000, "color": "Teal" }))
            .send(&make_service(orders))
            .await;

        let body: OrderMessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.order.balance_amount, 6000);

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_delivery_date_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order().never();

        let res = TestClient::put(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "expectedDeliveryDate": "soon" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_advance_above_amount_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InvalidData(
                "advance amount cannot exceed the order amount",
            ))
        });

        let res = TestClient::put(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "advanceAmount": 999_999 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
