//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use sowraashi_app::{
    domain::orders::{DEFAULT_ORDERS_PAGE_LIMIT, data::OrderFilter, status::OrderStatus},
    pagination::PageRequest,
};

use crate::{
    extensions::*,
    orders::{OrdersResponse, into_status_error},
    state::State,
};

/// Order Index Handler
///
/// Newest first. Designers see their own orders and unassigned storefront orders.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "A page of orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let status = status
        .into_inner()
        .filter(|status| status != "all" && !status.is_empty())
        .map(|status| status.parse::<OrderStatus>())
        .transpose()
        .or_400("unknown order status")?;

    let page = PageRequest::new(page.into_inner(), limit.into_inner(), DEFAULT_ORDERS_PAGE_LIMIT);

    let orders = state
        .app
        .orders
        .list_orders(principal, OrderFilter { status }, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.items.into_iter().map(Into::into).collect(),
        pagination: orders.pagination.into(),
    }))
}
