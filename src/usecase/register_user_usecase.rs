use crate::domain::{
    error::DomainError,
    models::user::User,
    repositories::user_repository::UserRepository,
    services::password_service::PasswordHasher,
};

pub struct RegisterUserUsecase<U: UserRepository, P: PasswordHasher> {
    user_repository: U,
    password_hasher: P,
}

impl<U: UserRepository, P: PasswordHasher> RegisterUserUsecase<U, P> {
    pub fn new(user_repository: U, password_hasher: P) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Register a new user. Expects input that already passed request validation.
    ///
    /// Fails with [`DomainError::DuplicateEmail`] when the email is taken, either
    /// by the existence check or by the storage constraint on insert.
    #[tracing::instrument(name = "register_user", skip_all, fields(email = %email))]
    pub async fn register_user(&self, email: String, password: String) -> Result<User, DomainError>
    where
        U: Send + Sync,
        P: Send + Sync,
    {
        if self.user_repository.exists_by_email(&email).await? {
            tracing::info!("email already registered");
            return Err(DomainError::DuplicateEmail(email));
        }

        let password_hash = self.password_hasher.hash(&password)?;
        drop(password);

        let user = self
            .user_repository
            .save(User::new(email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id().as_uuid(), "user registered");
        Ok(user)
    }
}
