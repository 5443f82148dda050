use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, SqlErr};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{phrases, prelude::*};
use crate::Result;
use hangman_types::{Phrase, DEFAULT_CATEGORY};

pub struct PhraseRepository {
    db: DatabaseConnection,
}

impl PhraseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub(crate) fn model_to_phrase(model: phrases::Model) -> Phrase {
        Phrase {
            id: model.id,
            text: model.text,
            category: model.category,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Phrase>> {
        let phrase_model = Phrases::find_by_id(id).one(&self.db).await?;
        Ok(phrase_model.map(Self::model_to_phrase))
    }

    pub async fn find_by_text(&self, text: &str) -> Result<Option<Phrase>> {
        let phrase_model = Phrases::find()
            .filter(phrases::Column::Text.eq(text))
            .one(&self.db)
            .await?;

        Ok(phrase_model.map(Self::model_to_phrase))
    }

    /// Look up a phrase by its exact text, inserting it with the default category if missing
    pub async fn find_or_create(&self, text: &str) -> Result<Phrase> {
        if let Some(phrase) = self.find_by_text(text).await? {
            debug!(phrase_id = %phrase.id, "Phrase already stored");
            return Ok(phrase);
        }

        let phrase_model = phrases::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            text: sea_orm::ActiveValue::Set(text.to_string()),
            category: sea_orm::ActiveValue::Set(DEFAULT_CATEGORY.to_string()),
        };

        match phrase_model.insert(&self.db).await {
            Ok(created) => {
                info!(phrase_id = %created.id, "Phrase created");
                Ok(Self::model_to_phrase(created))
            }
            // Another request stored the same text first
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let existing = self.find_by_text(text).await?;
                existing.ok_or_else(|| err.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
