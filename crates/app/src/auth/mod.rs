//! Bearer-token authentication.

pub mod errors;
pub mod models;
pub mod service;
pub mod token;

pub use errors::AuthServiceError;
pub use models::AuthenticatedUser;
pub use service::*;
pub use token::TokenCodec;
