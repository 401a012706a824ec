//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use sowraashi_app::{
    domain::products::{
        DEFAULT_PRODUCTS_PAGE_LIMIT,
        data::{Category, ProductFilter, ProductSort},
    },
    pagination::PageRequest,
};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    responses::PaginationResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
    pub pagination: PaginationResponse,
}

/// Product Index Handler
///
/// Lists the catalog, optionally filtered by category and search text.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "A page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category or bad paging"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = category
        .into_inner()
        .filter(|category| category != "all" && !category.is_empty())
        .map(|category| category.parse::<Category>())
        .transpose()
        .or_400("unknown category")?;

    let filter = ProductFilter {
        category,
        search: search.into_inner(),
    };

    let sort = ProductSort::from_param(sort.into_inner().as_deref());
    let page = PageRequest::new(page.into_inner(), limit.into_inner(), DEFAULT_PRODUCTS_PAGE_LIMIT);

    let products = state
        .app
        .products
        .list_products(filter, sort, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.items.into_iter().map(Into::into).collect(),
        pagination: products.pagination.into(),
    }))
}
