use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{games, prelude::*, scores};
use crate::repositories::PhraseRepository;
use crate::{PersistenceError, Result};
use hangman_types::{GameState, Phrase, Score};

/// Storage for game state. Every update is checked against the stored
/// `version`, and a finished game is written together with its score.
pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_state(model: games::Model) -> GameState {
        GameState {
            id: model.id,
            user_id: model.user_id,
            phrase_id: model.phrase_id,
            visible_so_far: model.visible_so_far,
            letters_guessed: model.letters_guessed,
            mistakes_allowed: model.mistakes_allowed,
            mistakes_remaining: model.mistakes_remaining,
            game_over: model.game_over,
            version: model.version,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn insert(&self, state: &GameState) -> Result<GameState> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&state.created_at).map_err(|err| {
            PersistenceError::InvalidRecord(format!(
                "game created_at {:?}: {}",
                state.created_at, err
            ))
        })?;

        let game_model = games::ActiveModel {
            id: sea_orm::ActiveValue::Set(state.id),
            user_id: sea_orm::ActiveValue::Set(state.user_id),
            phrase_id: sea_orm::ActiveValue::Set(state.phrase_id),
            visible_so_far: sea_orm::ActiveValue::Set(state.visible_so_far.clone()),
            letters_guessed: sea_orm::ActiveValue::Set(state.letters_guessed.clone()),
            mistakes_allowed: sea_orm::ActiveValue::Set(state.mistakes_allowed),
            mistakes_remaining: sea_orm::ActiveValue::Set(state.mistakes_remaining),
            game_over: sea_orm::ActiveValue::Set(state.game_over),
            version: sea_orm::ActiveValue::Set(state.version),
            created_at: sea_orm::ActiveValue::Set(created_at),
        };

        let created = game_model.insert(&self.db).await?;
        info!(game_id = %created.id, user_id = %created.user_id, "Game stored");
        Ok(Self::model_to_state(created))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GameState>> {
        let game_model = Games::find_by_id(id).one(&self.db).await?;
        Ok(game_model.map(Self::model_to_state))
    }

    /// Load a game along with the phrase it is played against
    pub async fn find_with_phrase(&self, id: Uuid) -> Result<Option<(GameState, Phrase)>> {
        let Some((game, phrase)) = Games::find_by_id(id)
            .find_also_related(Phrases)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let phrase = phrase.ok_or_else(|| {
            PersistenceError::InvalidRecord(format!("game {} references a missing phrase", id))
        })?;

        Ok(Some((
            Self::model_to_state(game),
            PhraseRepository::model_to_phrase(phrase),
        )))
    }

    /// Store a mutated game. Fails with `StaleGame` when the stored version
    /// no longer matches `state.version`.
    pub async fn save(&self, state: &GameState) -> Result<GameState> {
        Self::update_versioned(&self.db, state).await
    }

    /// Store a game that just ended and append its score in one transaction
    pub async fn save_finished(&self, state: &GameState, score: &Score) -> Result<GameState> {
        let date = NaiveDate::parse_from_str(&score.date, "%Y-%m-%d").map_err(|err| {
            PersistenceError::InvalidRecord(format!("score date {:?}: {}", score.date, err))
        })?;

        let txn = self.db.begin().await?;
        let saved = Self::update_versioned(&txn, state).await?;

        let score_model = scores::ActiveModel {
            id: sea_orm::ActiveValue::Set(score.id),
            user_id: sea_orm::ActiveValue::Set(score.user_id),
            game_id: sea_orm::ActiveValue::Set(score.game_id),
            date: sea_orm::ActiveValue::Set(date),
            won: sea_orm::ActiveValue::Set(score.won),
            mistakes_remaining: sea_orm::ActiveValue::Set(score.mistakes_remaining),
            phrase_length: sea_orm::ActiveValue::Set(score.phrase_length),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };
        Scores::insert(score_model).exec(&txn).await?;

        txn.commit().await?;

        info!(game_id = %state.id, won = score.won, "Game finished and score recorded");
        Ok(saved)
    }

    /// Remaining mistakes of every game that has not finished
    pub async fn in_progress_mistakes_remaining(&self) -> Result<Vec<i32>> {
        let remaining = Games::find()
            .select_only()
            .column(games::Column::MistakesRemaining)
            .filter(games::Column::GameOver.eq(false))
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;

        debug!(games = remaining.len(), "Loaded in-progress games");
        Ok(remaining)
    }

    async fn update_versioned<C: ConnectionTrait>(conn: &C, state: &GameState) -> Result<GameState> {
        let next_version = state.version + 1;

        let result = Games::update_many()
            .col_expr(games::Column::VisibleSoFar, Expr::value(state.visible_so_far.clone()))
            .col_expr(games::Column::LettersGuessed, Expr::value(state.letters_guessed.clone()))
            .col_expr(games::Column::MistakesRemaining, Expr::value(state.mistakes_remaining))
            .col_expr(games::Column::GameOver, Expr::value(state.game_over))
            .col_expr(games::Column::Version, Expr::value(next_version))
            .filter(games::Column::Id.eq(state.id))
            .filter(games::Column::Version.eq(state.version))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(PersistenceError::StaleGame { game_id: state.id });
        }

        Ok(GameState {
            version: next_version,
            ..state.clone()
        })
    }
}
