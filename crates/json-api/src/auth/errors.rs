//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use sowraashi_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        AuthServiceError::InvalidToken(_) => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        AuthServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        AuthServiceError::Sql(source) => {
            error!("user storage failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("password processing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Signing(source) => {
            error!("token signing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Task(source) => {
            error!("password task failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
