//! User repository for credential lookups.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use invoicer_core::auth::{StoredUser, UserLookup};
use invoicer_shared::{AppResult, types::UserId};

use super::error::DatabaseError;
use crate::entities::users;

/// User repository for lookups by email.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch user.` if the database query fails.
    pub async fn get_user(&self, email: &str) -> Result<Option<users::Model>, DatabaseError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(DatabaseError::wrap("Failed to fetch user."))
    }

    /// Creates a user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `Failed to create user.` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<users::Model, DatabaseError> {
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password: Set(password_hash.to_string()),
        };

        user.insert(&self.db)
            .await
            .map_err(DatabaseError::wrap("Failed to create user."))
    }
}

impl From<users::Model> for StoredUser {
    fn from(user: users::Model) -> Self {
        Self {
            id: UserId::from_uuid(user.id),
            name: user.name,
            email: user.email,
            password_hash: user.password,
        }
    }
}

#[async_trait]
impl UserLookup for UserRepository {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<StoredUser>> {
        Ok(self.get_user(email).await?.map(StoredUser::from))
    }
}
