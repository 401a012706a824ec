//! Order Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use sowraashi_app::domain::orders::data::PaymentUpdate;

use crate::{
    extensions::*,
    forms::FieldError,
    orders::{OrderMessageResponse, into_status_error, requests::PaymentRequest},
    state::State,
};

/// Order Payment Handler
///
/// Mounted at both `/payment` and `/payment-status`. A UPI transaction id is
/// only recorded when one is sent.
#[endpoint(
    tags("orders"),
    summary = "Update Payment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Payment status is required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<PaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    let update = PaymentUpdate::try_from(json.into_inner()).map_err(FieldError::into_status_error)?;

    let record = state
        .app
        .orders
        .update_payment(principal, order.into(), update)
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order, payment_status = %record.payment_status, "updated payment status");

    Ok(Json(OrderMessageResponse::new(
        "Payment status updated successfully",
        record,
    )))
}
