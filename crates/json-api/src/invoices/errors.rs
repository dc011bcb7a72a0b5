//! Invoice Errors

use hireline_app::domain::invoices::InvoicesServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: InvoicesServiceError) -> StatusError {
    match error {
        InvoicesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Invoice already exists")
        }
        InvoicesServiceError::InvalidReference
        | InvoicesServiceError::MissingRequiredData
        | InvoicesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid invoice payload")
        }
        InvoicesServiceError::NotFound => StatusError::not_found().brief("Invoice not found"),
        InvoicesServiceError::Sql(source) => {
            error!("invoices storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
