//! Availability service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvailabilityServiceError {
    #[error("product not found")]
    NotFound,

    #[error("requested quantity must be positive")]
    InvalidQuantity,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AvailabilityServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
