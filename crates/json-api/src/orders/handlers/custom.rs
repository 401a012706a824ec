//! Custom Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    forms::FieldError,
    observability,
    orders::{OrderMessageResponse, into_status_error, requests::CustomOrderRequest},
    state::State,
};

/// Custom Order Handler
///
/// Storefront order placement. No account is needed.
#[endpoint(
    tags("orders"),
    summary = "Place Custom Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CustomOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = json
        .into_inner()
        .into_new_order()
        .map_err(FieldError::into_status_error)?;

    let record = state
        .app
        .orders
        .create_public_order(order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/orders/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(order_uuid = %record.uuid, amount = record.amount, "placed custom order");

    observability::record_order_created("custom");

    Ok(Json(OrderMessageResponse::new(
        "Custom order created successfully",
        record,
    )))
}
