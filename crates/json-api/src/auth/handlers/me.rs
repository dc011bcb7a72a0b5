//! Current User Handler

use std::sync::Arc;

use hireline_app::domain::users::{UsersServiceError, records::UserRecord};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::{extensions::*, state::State};

/// Current User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MeResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<UserRecord> for MeResponse {
    fn from(user: UserRecord) -> Self {
        MeResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}

/// Current User Handler
///
/// Returns the account behind the presented session token.
#[endpoint(
    tags("auth"),
    summary = "Current user",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let record = state
        .app
        .users
        .get_user(user.uuid)
        .await
        .map_err(|error| match error {
            UsersServiceError::NotFound => {
                StatusError::unauthorized().brief("Account no longer exists")
            }
            other => {
                error!("failed to load current user: {other}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(record.into()))
}
