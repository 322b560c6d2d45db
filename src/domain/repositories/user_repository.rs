use async_trait::async_trait;

use crate::domain::{error::RepositoryError, models::user::User};

/// Persistence port for registered users.
///
/// Implementations must reject a second user with the same email on `save`
/// with [`RepositoryError::DuplicateEmail`], independently of any prior
/// `exists_by_email` check.
#[async_trait]
pub trait UserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;
    async fn save(&self, user: User) -> Result<User, RepositoryError>;
}
