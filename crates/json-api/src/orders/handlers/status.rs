//! Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use sowraashi_app::domain::orders::data::StatusUpdate;

use crate::{
    extensions::*,
    forms::FieldError,
    observability,
    orders::{OrderMessageResponse, into_status_error, requests::StatusRequest},
    state::State,
};

/// Order Status Handler
///
/// Moves the order along its lifecycle and records a progress note.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Status and description are required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
    ),
)]
#[tracing::instrument(
    name = "orders.status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<StatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    let update = StatusUpdate::try_from(json.into_inner()).map_err(FieldError::into_status_error)?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", tracing::field::display(update.status));

    let record = state
        .app
        .orders
        .update_status(principal, order.into(), update)
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order, status = %record.status, by = %principal.username, "updated order status");

    observability::record_status_change(record.status.as_str());

    Ok(Json(OrderMessageResponse::new(
        "Order status updated successfully",
        record,
    )))
}
