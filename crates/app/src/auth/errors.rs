//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("failed to sign token")]
    Token(#[source] jsonwebtoken::errors::Error),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}
