//! Auth service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::{errors::AuthServiceError, models::AuthenticatedUser, token::TokenCodec},
    domain::users::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgUsersRepository,
    codec: TokenCodec,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, codec: TokenCodec) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
            codec,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthServiceError> {
        let user = self
            .repository
            .find_user_by_email(email)
            .await
            .map_err(AuthServiceError::Sql)?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AuthServiceError::InvalidCredentials)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthServiceError::InvalidCredentials)?;

        self.codec
            .issue(user.uuid, user.role, Timestamp::now())
            .map_err(AuthServiceError::Token)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let claims = self
            .codec
            .verify(bearer_token)
            .map_err(|_| AuthServiceError::InvalidToken)?;

        let role = claims
            .role
            .parse()
            .map_err(|_| AuthServiceError::InvalidToken)?;

        Ok(AuthenticatedUser {
            uuid: claims.sub.into(),
            role,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a signed session token.
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthServiceError>;

    /// Validate a bearer token and resolve the identity it carries.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::{
            UsersService,
            data::NewUser,
            records::{Role, UserUuid},
        },
        test::TestContext,
    };

    use super::*;

    async fn register(ctx: &TestContext, email: &str, password: &str, role: Role) -> UserUuid {
        let uuid = UserUuid::new();

        ctx.users
            .create_user(NewUser {
                uuid,
                name: "Auth Test".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role,
            })
            .await
            .expect("creating test user should succeed");

        uuid
    }

    #[tokio::test]
    async fn login_issues_a_verifiable_token() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = register(&ctx, "vendor@example.com", "correct horse", Role::Vendor).await;

        let token = ctx.auth.login("vendor@example.com", "correct horse").await?;

        let user = ctx.auth.authenticate_bearer(&token).await?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.role, Role::Vendor);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let ctx = TestContext::new().await;

        register(&ctx, "user@example.com", "right", Role::Customer).await;

        let result = ctx.auth.login("user@example.com", "wrong").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn login_with_unknown_email_fails() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.login("ghost@example.com", "whatever").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn authenticate_bearer_rejects_garbage() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );
    }
}
