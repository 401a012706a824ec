//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use sowraashi_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        ProductsServiceError::InvalidPrice(source) => {
            StatusError::bad_request().brief(format!("Invalid price: {source}"))
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
