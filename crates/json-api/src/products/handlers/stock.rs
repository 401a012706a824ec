//! Product Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{ProductMessageResponse, into_status_error},
    state::State,
};

/// Stock Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StockRequest {
    pub in_stock: bool,
}

/// Product Stock Handler
#[endpoint(
    tags("products"),
    summary = "Set Product Stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<StockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();
    let in_stock = json.into_inner().in_stock;

    let record = state
        .app
        .products
        .set_stock(product.into(), in_stock)
        .await
        .map_err(into_status_error)?;

    info!(product_uuid = %product, in_stock, "updated product stock");

    Ok(Json(ProductMessageResponse::new(
        "Stock status updated successfully",
        record,
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use sowraashi_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::{products::handlers::tests::make_product, test_helpers::TestServices};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestServices::new()
            .with_products(products)
            .service(Router::with_path("products/{product}/stock").patch(handler))
    }

    #[tokio::test]
    async fn test_mark_out_of_stock() -> TestResult {
        let uuid = ProductUuid::new();

        let mut product = make_product(uuid, 2_000_00);
        product.in_stock = false;

        let mut products = MockProductsService::new();

        products
            .expect_set_stock()
            .once()
            .withf(move |p, in_stock| *p == uuid && !*in_stock)
            .return_once(move |_, _| Ok(product));

        let mut res = TestClient::patch(format!("http://example.com/products/{uuid}/stock"))
            .json(&json!({ "inStock": false }))
            .send(&make_service(products))
            .await;

        let body: ProductMessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.product.in_stock, "product should be out of stock");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_flag_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_set_stock().never();

        let res = TestClient::patch(format!("http://example.com/products/{}/stock", Uuid::now_v7()))
            .json(&json!({}))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_set_stock()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/products/{}/stock", Uuid::now_v7()))
            .json(&json!({ "inStock": true }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
