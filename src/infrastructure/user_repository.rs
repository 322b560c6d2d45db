use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, SqlErr,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        password::HashedPassword,
        user::{User, UserId},
    },
    repositories::user_repository::UserRepository,
};
use crate::infrastructure::entity::users;

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let matches = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(self.db.as_ref())
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(matches > 0)
    }

    async fn save(&self, user: User) -> Result<User, RepositoryError> {
        let email = user.email().to_string();
        let user_model = users::ActiveModel {
            id: Set(*user.id().as_uuid()),
            email: Set(email.clone()),
            password_hash: Set(user.password_hash().as_str().to_string()),
            created_at: Set(user.created_at().fixed_offset()),
        };

        let stored = user_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_error(e, &email))?;

        Ok(to_domain(stored))
    }
}

/// The unique index on `users.email` is the last line against two concurrent
/// registrations that both passed the existence check.
fn map_insert_error(err: DbErr, email: &str) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::warn!(%email, "insert rejected by unique constraint");
            RepositoryError::DuplicateEmail(email.to_string())
        }
        _ => RepositoryError::DatabaseError(err.to_string()),
    }
}

fn to_domain(model: users::Model) -> User {
    User::reconstruct(
        UserId::from_uuid(model.id),
        model.email,
        HashedPassword::new(model.password_hash),
        model.created_at.naive_utc().and_utc(),
    )
}
