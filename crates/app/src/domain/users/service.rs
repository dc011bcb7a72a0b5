//! Users service.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::users::{
    data::NewUser,
    errors::UsersServiceError,
    records::{UserRecord, UserUuid},
    repository::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let password_hash = hash_password(&user.password)?;

        self.repository
            .create_user(user.uuid, &user.name, &user.email, &password_hash, user.role)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        self.repository.get_user(user).await.map_err(Into::into)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        self.repository
            .find_user_by_email(email)
            .await
            .map_err(Into::into)
    }

    async fn admin_exists(&self) -> Result<bool, UsersServiceError> {
        self.repository.admin_exists().await.map_err(Into::into)
    }
}

fn hash_password(password: &str) -> Result<String, UsersServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(UsersServiceError::PasswordHash)
}

#[automock]
#[async_trait]
/// User account persistence operations.
pub trait UsersService: Send + Sync {
    /// Creates a new user, hashing the supplied password.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Look up a user by e-mail address.
    async fn find_user_by_email(&self, email: &str)
    -> Result<Option<UserRecord>, UsersServiceError>;

    /// Whether any admin account exists.
    async fn admin_exists(&self) -> Result<bool, UsersServiceError>;
}
