//! Login Handler

use std::sync::Arc;

use hireline_app::auth::AuthServiceError;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Signed session token to present as a bearer token
    pub token: String,
}

/// Login Handler
///
/// Exchanges credentials for a session token.
#[endpoint(
    tags("auth"),
    summary = "Log in",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let token = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(|error| match error {
            AuthServiceError::InvalidCredentials | AuthServiceError::InvalidToken => {
                StatusError::unauthorized().brief("Invalid e-mail or password")
            }
            AuthServiceError::Token(source) => {
                error!("failed to sign session token: {source}");

                StatusError::internal_server_error()
            }
            AuthServiceError::Sql(source) => {
                error!("failed to look up user for login: {source}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use hireline_app::auth::MockAuthService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{public_service, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            Router::with_path("auth/login").post(handler),
            state_with_auth(auth),
        )
    }

    #[tokio::test]
    async fn test_login_success_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|email, password| email == "a@example.com" && password == "secret")
            .return_once(|_, _| Ok("signed-token".to_string()));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "a@example.com", "password": "secret" }))
            .send(&make_service(auth))
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "signed-token");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_bad_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "a@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
