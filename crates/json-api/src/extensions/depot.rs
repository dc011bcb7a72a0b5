//! Depot helper extensions.

use std::any::Any;

use hireline_app::{auth::AuthenticatedUser, domain::users::records::Role};
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The identity established by the auth middleware, or `401`.
    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;

    /// The current user when they hold the vendor or admin role, or `403`.
    fn vendor_or_admin_or_403(&self) -> Result<AuthenticatedUser, StatusError>;

    /// The current user when they hold the vendor role, or `403`.
    fn vendor_or_403(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.obtain::<AuthenticatedUser>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn vendor_or_admin_or_403(&self) -> Result<AuthenticatedUser, StatusError> {
        let user = self.current_user_or_401()?;

        if user.role.is_vendor_or_admin() {
            Ok(user)
        } else {
            Err(StatusError::forbidden().brief("Vendor or admin role required"))
        }
    }

    fn vendor_or_403(&self) -> Result<AuthenticatedUser, StatusError> {
        let user = self.current_user_or_401()?;

        if user.role == Role::Vendor {
            Ok(user)
        } else {
            Err(StatusError::forbidden().brief("Vendor role required"))
        }
    }
}
