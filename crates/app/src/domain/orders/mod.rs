//! Orders

pub mod data;
pub mod errors;
pub mod records;
pub mod reservation;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;

pub(crate) use repositories::{PgOrderItemsRepository, PgOrdersRepository};
