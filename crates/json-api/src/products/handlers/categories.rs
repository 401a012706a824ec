//! Product Categories Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{CategoryResponse, into_status_error},
    state::State,
};

/// Product Categories Handler
///
/// Every catalog category with the number of products filed under it.
#[endpoint(
    tags("products"),
    summary = "List Categories",
    responses(
        (status_code = StatusCode::OK, description = "Category counts"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .products
        .categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
