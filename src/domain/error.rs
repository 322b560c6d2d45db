use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),
}

impl From<RepositoryError> for DomainError {
    /// A constraint violation reported by storage is the same business failure
    /// as a positive existence check.
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail(email) => DomainError::DuplicateEmail(email),
            other => DomainError::Repository(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Email already stored: {0}")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
