use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ServiceError;
use hangman_core::{
    GAME_STATE_MESSAGE, Game, GameEvent, GameEventBus, GameEventHandler, GuessOutcome,
    NEW_GAME_MESSAGE, StatisticsCache, validate_mistakes_allowed,
};
use hangman_persistence::PersistenceError;
use hangman_persistence::repositories::{
    GameRepository, PhraseRepository, ScoreRepository, UserRepository,
};
use hangman_types::{DEFAULT_MISTAKES_ALLOWED, GameId, GameState, GameView, ScoreView, User};

/// Entry point for every game operation exposed to the API layer.
///
/// Validation always happens before anything is written, and a finished game
/// is stored together with its score.
pub struct GameManager {
    users: UserRepository,
    phrases: PhraseRepository,
    games: GameRepository,
    scores: ScoreRepository,
    statistics: Arc<StatisticsCache>,
    event_bus: GameEventBus,
    default_mistakes_allowed: i32,
}

impl GameManager {
    pub fn new(db: DatabaseConnection, statistics: Arc<StatisticsCache>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            phrases: PhraseRepository::new(db.clone()),
            games: GameRepository::new(db.clone()),
            scores: ScoreRepository::new(db),
            statistics,
            event_bus: GameEventBus::new(),
            default_mistakes_allowed: DEFAULT_MISTAKES_ALLOWED,
        }
    }

    pub fn with_default_mistakes_allowed(mut self, mistakes_allowed: i32) -> Self {
        self.default_mistakes_allowed = mistakes_allowed;
        self
    }

    pub fn with_event_handler(mut self, handler: Box<dyn GameEventHandler>) -> Self {
        self.event_bus.add_handler(handler);
        self
    }

    pub async fn create_user(
        &self,
        user_name: &str,
        email: Option<String>,
    ) -> Result<User, ServiceError> {
        if user_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "User name must not be empty".to_string(),
            ));
        }

        Ok(self.users.create_user(user_name, email).await?)
    }

    pub async fn create_game(
        &self,
        user_name: &str,
        phrase_text: &str,
        mistakes_allowed: Option<i32>,
    ) -> Result<GameView, ServiceError> {
        let mistakes_allowed =
            validate_mistakes_allowed(mistakes_allowed.unwrap_or(self.default_mistakes_allowed))?;
        if phrase_text.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Phrase must not be empty".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_name(user_name)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("A User with that name does not exist!".to_string())
            })?;

        let phrase = self.phrases.find_or_create(phrase_text).await?;
        let game = Game::new(Uuid::new_v4(), user.id, &phrase, mistakes_allowed)?;
        let state = self.games.insert(&game.state).await?;

        info!(game_id = %state.id, user = %user.name, mistakes_allowed, "Created game");
        self.event_bus.publish(GameEvent::GameCreated {
            game_id: state.id,
            user_id: user.id,
            mistakes_allowed,
        });

        Ok(GameView::new(&state, user.name, NEW_GAME_MESSAGE))
    }

    pub async fn get_game(&self, game_id: GameId) -> Result<GameView, ServiceError> {
        let state = self
            .games
            .find_by_id(game_id)
            .await?
            .ok_or_else(game_not_found)?;

        let user_name = self.user_name(&state).await?;
        Ok(GameView::new(&state, user_name, GAME_STATE_MESSAGE))
    }

    /// Apply one guess and return the resulting state with its message
    pub async fn make_move(
        &self,
        game_id: GameId,
        guess_letter: &str,
    ) -> Result<GameView, ServiceError> {
        let (state, phrase) = self
            .games
            .find_with_phrase(game_id)
            .await?
            .ok_or_else(game_not_found)?;
        let user_name = self.user_name(&state).await?;

        let mut game = Game::restore(state, phrase.text);
        let outcome = game.apply_guess(guess_letter).inspect_err(|err| {
            warn!(%game_id, guess = guess_letter, "Rejected guess: {}", err);
        })?;
        let message = outcome.message(game.phrase());

        let state = match &outcome {
            GuessOutcome::AlreadyOver | GuessOutcome::AlreadyGuessed(_) => game.state,
            GuessOutcome::Finished(termination) => {
                let score = termination.clone().into_score(
                    game.state.user_id,
                    game.state.id,
                    chrono::Utc::now().date_naive(),
                );
                let saved = self.games.save_finished(&game.state, &score).await?;

                info!(%game_id, won = termination.won, "Game over");
                self.publish_guess(&saved, guess_letter);
                self.event_bus.publish(GameEvent::GameEnded {
                    game_id,
                    user_id: saved.user_id,
                    won: termination.won,
                });
                saved
            }
            GuessOutcome::Miss(_) | GuessOutcome::Hit(_) => {
                let saved = self.games.save(&game.state).await?;
                self.publish_guess(&saved, guess_letter);
                saved
            }
        };

        Ok(GameView::new(&state, user_name, message))
    }

    pub async fn list_scores(&self) -> Result<Vec<ScoreView>, ServiceError> {
        Ok(self.scores.list_all().await?)
    }

    pub async fn list_user_scores(&self, user_name: &str) -> Result<Vec<ScoreView>, ServiceError> {
        let user = self
            .users
            .find_by_name(user_name)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("A User with that name does not exist!".to_string())
            })?;

        Ok(self.scores.list_by_user(user.id).await?)
    }

    /// Last cached average, or an empty string before the first computation
    pub fn get_average_remaining(&self) -> String {
        self.statistics.read()
    }

    /// Recompute the cached average from the games currently in progress
    pub async fn cache_average_attempts(&self) -> Result<Option<String>, ServiceError> {
        let remaining = self.games.in_progress_mistakes_remaining().await?;
        Ok(self.statistics.recompute(&remaining))
    }

    async fn user_name(&self, state: &GameState) -> Result<String, ServiceError> {
        let user = self.users.find_by_id(state.user_id).await?.ok_or_else(|| {
            ServiceError::Storage(PersistenceError::InvalidRecord(format!(
                "game {} references a missing user",
                state.id
            )))
        })?;
        Ok(user.name)
    }

    fn publish_guess(&self, state: &GameState, guess_letter: &str) {
        if let Some(letter) = guess_letter.chars().next() {
            self.event_bus.publish(GameEvent::GuessApplied {
                game_id: state.id,
                letter,
                mistakes_remaining: state.mistakes_remaining,
            });
        }
    }
}

fn game_not_found() -> ServiceError {
    ServiceError::NotFound("Game not found!".to_string())
}
