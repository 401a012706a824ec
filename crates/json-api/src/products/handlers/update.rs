//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    forms::{FieldError, FormFields},
    products::{ProductMessageResponse, into_status_error, requests::ProductForm},
    state::State,
    uploads::UploadError,
};

/// Update Product Handler
///
/// Only the submitted fields change. A new `image` file replaces the old one.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, req, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let form = state.uploads.read_form(req, 1).await?;
    let fields = FormFields::new(form);

    let update = ProductForm::parse(&fields).map_err(FieldError::into_status_error)?;

    let stored = match fields.file("image") {
        Some(image) => Some(
            state
                .uploads
                .store(image, update.image_label())
                .await
                .map_err(UploadError::into_status_error)?,
        ),
        None => None,
    };

    let update = update.into_update(stored.as_ref().map(|upload| upload.url.clone()));

    let record = match state.app.products.update_product(product.into(), update).await {
        Ok(record) => record,
        Err(error) => {
            if let Some(stored) = stored {
                state.uploads.discard(&[stored]).await;
            }

            return Err(into_status_error(error));
        }
    };

    info!(product_uuid = %product, "updated product");

    Ok(Json(ProductMessageResponse::new(
        "Product updated successfully",
        record,
    )))
}
