use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use crate::entities::{prelude::*, scores};
use crate::{PersistenceError, Result};
use hangman_types::{Score, ScoreView};

/// Read side of the score ledger. Scores are only ever written by
/// `GameRepository::save_finished`, so this type has no insert path.
pub struct ScoreRepository {
    db: DatabaseConnection,
}

impl ScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_score(model: scores::Model) -> Score {
        Score {
            id: model.id,
            user_id: model.user_id,
            game_id: model.game_id,
            date: model.date.format("%Y-%m-%d").to_string(),
            won: model.won,
            mistakes_remaining: model.mistakes_remaining,
            phrase_length: model.phrase_length,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<ScoreView>> {
        self.load_views(Scores::find()).await
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ScoreView>> {
        self.load_views(Scores::find().filter(scores::Column::UserId.eq(user_id)))
            .await
    }

    pub async fn find_by_game(&self, game_id: Uuid) -> Result<Option<Score>> {
        let score_model = Scores::find()
            .filter(scores::Column::GameId.eq(game_id))
            .one(&self.db)
            .await?;

        Ok(score_model.map(Self::model_to_score))
    }

    async fn load_views(&self, query: Select<Scores>) -> Result<Vec<ScoreView>> {
        let rows = query
            .order_by_asc(scores::Column::Date)
            .order_by_asc(scores::Column::CreatedAt)
            .find_also_related(Users)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(score, user)| {
                let user = user.ok_or_else(|| {
                    PersistenceError::InvalidRecord(format!(
                        "score {} references a missing user",
                        score.id
                    ))
                })?;
                Ok(ScoreView::new(&Self::model_to_score(score), user.name))
            })
            .collect()
    }
}
