//! Availability Errors

use hireline_app::domain::availability::AvailabilityServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AvailabilityServiceError) -> StatusError {
    match error {
        AvailabilityServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        AvailabilityServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        AvailabilityServiceError::Sql(source) => {
            error!("failed to check availability: {source}");

            StatusError::internal_server_error()
        }
    }
}
