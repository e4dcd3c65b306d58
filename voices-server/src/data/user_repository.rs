use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserCredentials>, DomainError>;

    /// Atomically renames the account; the unique email constraint resolves
    /// concurrent conflicts instead of a pre-check SELECT.
    async fn update_profile(
        &self,
        id: i64,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, DomainError>;

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, DomainError>;

    async fn total_users(&self) -> Result<i64, DomainError>;
}
