use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, SqlErr};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use crate::{PersistenceError, Result};
use hangman_types::User;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub(crate) fn model_to_user(model: users::Model) -> User {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user_model = Users::find_by_id(id).one(&self.db).await?;
        Ok(user_model.map(Self::model_to_user))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let user_model = Users::find()
            .filter(users::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(user_model.map(Self::model_to_user))
    }

    /// Create a user with a unique name. A taken name is an error, not a lookup.
    pub async fn create_user(&self, name: &str, email: Option<String>) -> Result<User> {
        if self.find_by_name(name).await?.is_some() {
            return Err(PersistenceError::DuplicateUser {
                name: name.to_string(),
            });
        }

        let now = chrono::Utc::now().into();
        let user_model = users::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            email: sea_orm::ActiveValue::Set(email),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
        };

        // The unique index still guards against a racing insert of the same name
        let created = user_model.insert(&self.db).await.map_err(|err| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                PersistenceError::DuplicateUser {
                    name: name.to_string(),
                }
            } else {
                PersistenceError::from(err)
            }
        })?;

        info!(user_id = %created.id, name = %created.name, "User created");
        Ok(Self::model_to_user(created))
    }

    /// Email is the only user field that may change after creation
    pub async fn update_email(&self, user_id: Uuid, email: Option<String>) -> Result<Option<User>> {
        let Some(user) = Users::find_by_id(user_id).one(&self.db).await? else {
            debug!(%user_id, "No user to update");
            return Ok(None);
        };

        let updated_user = users::ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(user.id),
            name: sea_orm::ActiveValue::Unchanged(user.name),
            email: sea_orm::ActiveValue::Set(email),
            created_at: sea_orm::ActiveValue::Unchanged(user.created_at),
            updated_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        let saved = updated_user.update(&self.db).await?;
        Ok(Some(Self::model_to_user(saved)))
    }
}
