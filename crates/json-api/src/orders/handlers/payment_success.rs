//! Payment Success Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use sowraashi_app::domain::orders::data::{PaymentStatus, PaymentUpdate};

use crate::{
    extensions::*,
    orders::{OrderMessageResponse, into_status_error},
    state::State,
};

/// Payment Success Handler
///
/// Marks the order's payment as `paymentSuccessful`. Takes no body.
#[endpoint(
    tags("orders"),
    summary = "Mark Payment Successful",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment marked successful"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    let update = PaymentUpdate {
        payment_status: PaymentStatus::PaymentSuccessful,
        upi_transaction_id: None,
    };

    let record = state
        .app
        .orders
        .update_payment(principal, order.into(), update)
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order, "payment marked successful");

    Ok(Json(OrderMessageResponse::new(
        "Payment status updated successfully",
        record,
    )))
}
