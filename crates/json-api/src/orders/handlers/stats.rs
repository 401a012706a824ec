//! Order Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrderStatsResponse, into_status_error},
    state::State,
};

/// Order Stats Handler
///
/// Admins see totals across every order. Designers see their own.
#[endpoint(
    tags("orders"),
    summary = "Order Statistics",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order counters"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let stats = state
        .app
        .orders
        .stats(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
