//! Auth Models

use crate::domain::users::records::{Role, UserUuid};

/// Identity established by a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub role: Role,
}
