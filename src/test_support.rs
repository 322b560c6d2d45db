//! In-memory doubles for the persistence and hashing ports.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{password::HashedPassword, user::User},
    repositories::user_repository::UserRepository,
    services::password_service::PasswordHasher,
};

/// Stores users in a map keyed by email and enforces uniqueness on save,
/// like the unique index does in Postgres.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn stored(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.users.lock().unwrap().contains_key(email))
    }

    async fn save(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.email()) {
            return Err(RepositoryError::DuplicateEmail(user.email().to_string()));
        }
        users.insert(user.email().to_string(), user.clone());
        Ok(user)
    }
}

/// Passes the existence check, then loses the insert to a concurrent writer.
#[derive(Clone)]
pub struct RacingUserRepository;

#[async_trait]
impl UserRepository for RacingUserRepository {
    async fn exists_by_email(&self, _email: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn save(&self, user: User) -> Result<User, RepositoryError> {
        Err(RepositoryError::DuplicateEmail(user.email().to_string()))
    }
}

/// Storage that is reachable for reads but fails every write.
#[derive(Clone)]
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn exists_by_email(&self, _email: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn save(&self, _user: User) -> Result<User, RepositoryError> {
        Err(RepositoryError::DatabaseError("connection refused".to_string()))
    }
}

/// Deterministic stand-in for argon2; encodes only the password length.
#[derive(Clone)]
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        Ok(HashedPassword::new(format!("mock_hash:{}", plain_password.len())))
    }

    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        Ok(hashed_password.as_str() == format!("mock_hash:{}", plain_password.len()))
    }
}

/// Hasher whose backend is broken.
#[derive(Clone)]
pub struct BrokenPasswordHasher;

impl PasswordHasher for BrokenPasswordHasher {
    fn hash(&self, _plain_password: &str) -> Result<HashedPassword, DomainError> {
        Err(DomainError::PasswordHashing("out of memory".to_string()))
    }

    fn verify(
        &self,
        _plain_password: &str,
        _hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        Err(DomainError::PasswordHashing("out of memory".to_string()))
    }
}
