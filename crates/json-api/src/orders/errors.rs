//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use sowraashi_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => StatusError::forbidden().brief("Access denied"),
        OrdersServiceError::InvalidTransition(transition) => {
            StatusError::conflict().brief(transition.to_string())
        }
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Order references an unknown record")
        }
        OrdersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("All fields are required")
        }
        OrdersServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        OrdersServiceError::InvalidAmount(source) => {
            StatusError::bad_request().brief(format!("Invalid amount: {source}"))
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
