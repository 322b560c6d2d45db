use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::password::HashedPassword;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(Uuid);
impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: String,
    password_hash: HashedPassword,
    created_at: DateTime<Utc>,
}

impl User {
    /// A user that has not been stored yet. The id is assigned here, not by storage.
    pub fn new(email: String, password_hash: HashedPassword) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn reconstruct(
        id: UserId,
        email: String,
        password_hash: HashedPassword,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    // getters only
    pub fn id(&self) -> &UserId {
        &self.id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
