//! Availability

pub mod errors;
pub mod records;
pub mod service;

pub use errors::AvailabilityServiceError;
pub use service::*;
